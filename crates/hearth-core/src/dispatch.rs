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

//! The contract between the bridge and the embedded engine it feeds.
//!
//! The engine implements [`DispatchTarget`]. The bridge owns exactly one target for
//! the lifetime of the process and never inspects its state; it only calls into it.

use crate::input::{Key, ScreenRotation, Sensor};
use thiserror::Error;

/// Receives normalized input events.
pub trait InputSink {
    /// A key was pressed.
    fn push(&mut self, key: Key);

    /// A key was released.
    fn release(&mut self, key: Key);

    /// A mouse button was pressed at `(x, y)`.
    fn mouse_down(&mut self, button: u32, x: i32, y: i32);

    /// A mouse button was released at `(x, y)`.
    fn mouse_up(&mut self, button: u32, x: i32, y: i32);

    /// The mouse cursor moved to `(x, y)`.
    fn mouse_move(&mut self, x: i32, y: i32);

    /// The contact `index` touched the surface at `(x, y)`.
    fn touch_start(&mut self, index: u32, x: i32, y: i32);

    /// The contact `index` left the surface at `(x, y)`.
    fn touch_end(&mut self, index: u32, x: i32, y: i32);

    /// The contact `index` moved to `(x, y)`.
    fn touch_move(&mut self, index: u32, x: i32, y: i32);

    /// A gamepad axis changed. `value` is a normalized analog reading.
    fn gamepad_axis(&mut self, axis: u32, value: f32);

    /// A gamepad button changed. `value` is in `0.0..=1.0`.
    fn gamepad_button(&mut self, button: u32, value: f32);

    /// A motion sensor reported a new vector.
    fn sensor_changed(&mut self, sensor: Sensor, x: f32, y: f32, z: f32);
}

/// Receives application lifecycle notifications.
pub trait LifecycleSink {
    /// The application became visible.
    fn foreground(&mut self);

    /// The application is no longer visible.
    fn background(&mut self);

    /// The application resumed after a pause.
    fn resume(&mut self);

    /// The application is about to pause.
    fn pause(&mut self);

    /// The application is shutting down. No further frames are guaranteed.
    fn shutdown(&mut self);
}

/// Per-frame information handed to [`DispatchTarget::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameContext {
    /// Number of frames rendered before this one.
    pub frame_index: u64,
    /// The rotation the target should apply to its output.
    pub rotation: ScreenRotation,
}

/// The error an engine reports when it fails to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StartupError {
    message: String,
}

impl StartupError {
    /// Creates a startup error carrying the engine's message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message reported by the engine.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The embedded engine that consumes the normalized event stream.
pub trait DispatchTarget: InputSink + LifecycleSink {
    /// Starts the engine. Called exactly once, before any input is delivered.
    fn start(&mut self) -> Result<(), StartupError>;

    /// Updates and draws one frame. Only called between graphics begin and end.
    fn frame(&mut self, context: &FrameContext);
}
