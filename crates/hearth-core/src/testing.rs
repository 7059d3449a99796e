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

//! Recording doubles shared by the unit tests.

use crate::dispatch::{DispatchTarget, FrameContext, InputSink, LifecycleSink, StartupError};
use crate::frame::{AudioSubsystem, GraphicsSubsystem, RenderState};
use crate::input::{Key, Sensor};
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// A shared, ordered log of subsystem and target activity.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<&'static str>>>);

impl Journal {
    pub(crate) fn record(&self, entry: &'static str) {
        self.0.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Push(Key),
    Release(Key),
    MouseDown(u32, i32, i32),
    MouseUp(u32, i32, i32),
    MouseMove(i32, i32),
    TouchStart(u32, i32, i32),
    TouchEnd(u32, i32, i32),
    TouchMove(u32, i32, i32),
    GamepadAxis(u32, f32),
    GamepadButton(u32, f32),
    Sensor(Sensor, f32, f32, f32),
    Foreground,
    Background,
    Resume,
    Pause,
    Shutdown,
    Start,
    Frame(FrameContext),
}

pub(crate) struct RecordingTarget {
    pub(crate) calls: Vec<Call>,
    start_error: Option<StartupError>,
    journal: Option<Journal>,
}

impl RecordingTarget {
    pub(crate) fn new() -> Self {
        Self {
            calls: Vec::new(),
            start_error: None,
            journal: None,
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            start_error: Some(StartupError::new(message)),
            ..Self::new()
        }
    }

    pub(crate) fn with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new()
        }
    }

    pub(crate) fn frames(&self) -> Vec<FrameContext> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Frame(context) => Some(*context),
                _ => None,
            })
            .collect()
    }
}

impl InputSink for RecordingTarget {
    fn push(&mut self, key: Key) {
        self.calls.push(Call::Push(key));
    }
    fn release(&mut self, key: Key) {
        self.calls.push(Call::Release(key));
    }
    fn mouse_down(&mut self, button: u32, x: i32, y: i32) {
        self.calls.push(Call::MouseDown(button, x, y));
    }
    fn mouse_up(&mut self, button: u32, x: i32, y: i32) {
        self.calls.push(Call::MouseUp(button, x, y));
    }
    fn mouse_move(&mut self, x: i32, y: i32) {
        self.calls.push(Call::MouseMove(x, y));
    }
    fn touch_start(&mut self, index: u32, x: i32, y: i32) {
        self.calls.push(Call::TouchStart(index, x, y));
    }
    fn touch_end(&mut self, index: u32, x: i32, y: i32) {
        self.calls.push(Call::TouchEnd(index, x, y));
    }
    fn touch_move(&mut self, index: u32, x: i32, y: i32) {
        self.calls.push(Call::TouchMove(index, x, y));
    }
    fn gamepad_axis(&mut self, axis: u32, value: f32) {
        self.calls.push(Call::GamepadAxis(axis, value));
    }
    fn gamepad_button(&mut self, button: u32, value: f32) {
        self.calls.push(Call::GamepadButton(button, value));
    }
    fn sensor_changed(&mut self, sensor: Sensor, x: f32, y: f32, z: f32) {
        self.calls.push(Call::Sensor(sensor, x, y, z));
    }
}

impl LifecycleSink for RecordingTarget {
    fn foreground(&mut self) {
        self.calls.push(Call::Foreground);
    }
    fn background(&mut self) {
        self.calls.push(Call::Background);
    }
    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
    fn shutdown(&mut self) {
        self.calls.push(Call::Shutdown);
    }
}

impl DispatchTarget for RecordingTarget {
    fn start(&mut self) -> Result<(), StartupError> {
        self.calls.push(Call::Start);
        match self.start_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn frame(&mut self, context: &FrameContext) {
        if let Some(journal) = &self.journal {
            journal.record("frame");
        }
        self.calls.push(Call::Frame(*context));
    }
}

pub(crate) struct RecordingAudio {
    journal: Journal,
    failure: Option<anyhow::Error>,
}

impl RecordingAudio {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            failure: None,
        }
    }

    pub(crate) fn fail_with(&mut self, err: anyhow::Error) {
        self.failure = Some(err);
    }
}

impl AudioSubsystem for RecordingAudio {
    fn update(&mut self) -> Result<()> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        self.journal.record("audio");
        Ok(())
    }
}

pub(crate) struct RecordingGraphics {
    journal: Journal,
    begin_failure: Option<anyhow::Error>,
    pub(crate) depth_test: Option<bool>,
}

impl RecordingGraphics {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            begin_failure: None,
            depth_test: None,
        }
    }

    pub(crate) fn fail_begin_with(&mut self, err: anyhow::Error) {
        self.begin_failure = Some(err);
    }
}

impl GraphicsSubsystem for RecordingGraphics {
    fn set_render_state(&mut self, state: RenderState, enabled: bool) {
        match state {
            RenderState::DepthTest => self.depth_test = Some(enabled),
        }
    }

    fn begin(&mut self) -> Result<()> {
        if let Some(err) = self.begin_failure.take() {
            return Err(err);
        }
        self.journal.record("begin");
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.journal.record("end");
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.journal.record("present");
        Ok(())
    }
}
