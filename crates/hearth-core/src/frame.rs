// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The per-tick frame pump and the subsystem contracts it drives.

use crate::dispatch::{DispatchTarget, FrameContext};
use crate::state::BridgeState;
use anyhow::Result;

/// A fixed-function render state toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// Depth testing against a depth buffer.
    DepthTest,
}

/// The audio side of the platform.
///
/// Errors are fatal: the host stops the run loop when one is returned.
pub trait AudioSubsystem {
    /// Advances audio by one host tick. Called whether or not the app is visible.
    fn update(&mut self) -> Result<()>;
}

/// The graphics side of the platform.
///
/// Errors are fatal: the host stops the run loop when one is returned.
pub trait GraphicsSubsystem {
    /// Enables or disables a render state for subsequent frames.
    fn set_render_state(&mut self, state: RenderState, enabled: bool);

    /// Begins a frame.
    fn begin(&mut self) -> Result<()>;

    /// Ends the frame started by [`GraphicsSubsystem::begin`].
    fn end(&mut self) -> Result<()>;

    /// Presents the last ended frame.
    fn present(&mut self) -> Result<()>;
}

/// What a [`FramePump::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was rendered and presented.
    Presented,
    /// The app is hidden; only audio ran.
    Skipped,
}

/// Drives one audio tick and, while visible, one rendered frame per host tick.
#[derive(Debug, Default)]
pub struct FramePump {
    ticks: u64,
    frames_presented: u64,
}

impl FramePump {
    /// Creates a pump that has not ticked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one host tick.
    ///
    /// Audio always advances. Graphics begin, the target's frame, graphics end and
    /// present happen only when `state` is visible; otherwise no graphics call is
    /// made at all.
    pub fn tick<T, A, G>(
        &mut self,
        state: &BridgeState,
        audio: &mut A,
        graphics: &mut G,
        target: &mut T,
    ) -> Result<FrameOutcome>
    where
        T: DispatchTarget + ?Sized,
        A: AudioSubsystem + ?Sized,
        G: GraphicsSubsystem + ?Sized,
    {
        self.ticks += 1;
        audio.update()?;

        if !state.is_visible() {
            log::trace!("Tick {}: hidden, skipping render", self.ticks);
            return Ok(FrameOutcome::Skipped);
        }

        let context = FrameContext {
            frame_index: self.frames_presented,
            rotation: state.rotation(),
        };
        graphics.begin()?;
        target.frame(&context);
        graphics.end()?;
        graphics.present()?;

        self.frames_presented += 1;
        log::trace!("Frame {} presented.", context.frame_index);
        Ok(FrameOutcome::Presented)
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}
