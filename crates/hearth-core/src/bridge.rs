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

//! The fully wired bridge a host drives from its run loop.

use crate::callbacks::{CallbackCategory, CallbackTable};
use crate::dispatch::DispatchTarget;
use crate::frame::{AudioSubsystem, FrameOutcome, FramePump, GraphicsSubsystem};
use crate::lifecycle::{LifecycleController, LifecycleSignal};
use crate::normalizer::{EventNormalizer, NativeEvent};
use crate::state::BridgeState;
use anyhow::Result;

/// Everything a host can deliver to the bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// A native input or orientation callback.
    Native(NativeEvent),
    /// A lifecycle transition.
    Lifecycle(LifecycleSignal),
    /// A host tick: run the frame pump.
    Frame,
}

impl HostEvent {
    /// The callback category this event belongs to.
    pub fn category(&self) -> CallbackCategory {
        match self {
            HostEvent::Native(event) => event.category(),
            HostEvent::Lifecycle(_) => CallbackCategory::Lifecycle,
            HostEvent::Frame => CallbackCategory::Frame,
        }
    }
}

/// Owns the dispatch target, the audio and graphics subsystems, and the bridge state.
///
/// Only the [`Bootstrapper`](crate::Bootstrapper) builds a bridge, after the engine has
/// started and every callback category has been registered. Hosts receive it ready to
/// use and feed it events in delivery order.
pub struct Bridge<T, A, G> {
    target: T,
    audio: A,
    graphics: G,
    state: BridgeState,
    callbacks: CallbackTable,
    pump: FramePump,
}

impl<T, A, G> Bridge<T, A, G>
where
    T: DispatchTarget,
    A: AudioSubsystem,
    G: GraphicsSubsystem,
{
    pub(crate) fn new(
        target: T,
        audio: A,
        graphics: G,
        state: BridgeState,
        callbacks: CallbackTable,
    ) -> Self {
        Self {
            target,
            audio,
            graphics,
            state,
            callbacks,
            pump: FramePump::new(),
        }
    }

    /// Handles one host event.
    ///
    /// Events whose category is not registered are dropped. The only error source is
    /// the frame pump; hosts treat it as fatal.
    pub fn handle(&mut self, event: HostEvent) -> Result<()> {
        if !self.callbacks.is_registered(event.category()) {
            log::trace!("Dropping {event:?}: no handler registered");
            return Ok(());
        }

        match event {
            HostEvent::Native(native) => {
                EventNormalizer::dispatch(&mut self.state, &mut self.target, native);
            }
            HostEvent::Lifecycle(signal) => {
                LifecycleController::apply(&mut self.state, &mut self.target, signal);
            }
            HostEvent::Frame => {
                self.tick()?;
            }
        }
        Ok(())
    }

    /// Runs the frame pump once.
    pub fn tick(&mut self) -> Result<FrameOutcome> {
        self.pump.tick(
            &self.state,
            &mut self.audio,
            &mut self.graphics,
            &mut self.target,
        )
    }

    /// The bridge state.
    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// The registered callback categories.
    pub fn callbacks(&self) -> &CallbackTable {
        &self.callbacks
    }

    /// The frame pump.
    pub fn pump(&self) -> &FramePump {
        &self.pump
    }

    /// The dispatch target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The graphics subsystem, for host-side work such as surface attachment and resizing.
    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.graphics
    }

    /// Consumes the bridge, returning the target.
    pub fn into_target(self) -> T {
        self.target
    }
}
