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

//! The `winit` [`Host`]: owns the event loop and feeds the bridge from it.

use super::gamepad::GamepadInput;
use super::input::{pixel_position, translate_mouse_button, KeySlots, TouchSlots};
use super::window::{WinitWindow, WinitWindowBuilder};
use crate::audio::CpalAudio;
use crate::graphics::WgpuGraphics;
use anyhow::{anyhow, Result};
use hearth_core::{
    AppConfig, Bridge, DispatchTarget, Host, HostEvent, LifecycleSignal, NativeEvent,
    ScreenRotation,
};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

/// Signals delivered when the application returns to the foreground.
const RESUMED: [LifecycleSignal; 2] = [LifecycleSignal::Resume, LifecycleSignal::Foreground];

/// Signals delivered when the application is sent to the background.
const SUSPENDED: [LifecycleSignal; 2] = [LifecycleSignal::Pause, LifecycleSignal::Background];

/// The visibility signal for a window occlusion change.
fn occlusion_signal(occluded: bool) -> LifecycleSignal {
    if occluded {
        LifecycleSignal::Background
    } else {
        LifecycleSignal::Foreground
    }
}

/// A desktop host built on `winit`.
///
/// The event loop is created with the subsystems, but the window is only built
/// once the loop reports the application as resumed; graphics attach to it then.
#[derive(Default)]
pub struct WinitHost {
    event_loop: Option<EventLoop<()>>,
    window_builder: WinitWindowBuilder,
}

impl WinitHost {
    /// Creates a host with no event loop yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for WinitHost {
    type Audio = CpalAudio;
    type Graphics = WgpuGraphics;

    fn create_subsystems(&mut self, config: &AppConfig) -> Result<(CpalAudio, WgpuGraphics)> {
        let event_loop = EventLoop::new()?;
        let audio = CpalAudio::open()?;

        self.window_builder = WinitWindowBuilder::from_config(config);
        self.event_loop = Some(event_loop);
        Ok((audio, WgpuGraphics::new()))
    }

    fn forced_rotation(&self) -> Option<ScreenRotation> {
        cfg!(target_os = "ios").then_some(ScreenRotation::Rotation270)
    }

    fn run<T: DispatchTarget>(
        &mut self,
        bridge: Bridge<T, CpalAudio, WgpuGraphics>,
    ) -> Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow!("WinitHost::run called before create_subsystems"))?;

        let mut state = HostState {
            bridge,
            window_builder: self.window_builder.clone(),
            window: None,
            cursor: (0, 0),
            keys: KeySlots::new(),
            touches: TouchSlots::new(),
            gamepad: GamepadInput::new(),
            failure: None,
        };
        event_loop.run_app(&mut state)?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The state driven by the `winit` event loop.
struct HostState<T: DispatchTarget> {
    bridge: Bridge<T, CpalAudio, WgpuGraphics>,
    window_builder: WinitWindowBuilder,
    window: Option<WinitWindow>,
    cursor: (i32, i32),
    keys: KeySlots,
    touches: TouchSlots,
    gamepad: Option<GamepadInput>,
    failure: Option<anyhow::Error>,
}

impl<T: DispatchTarget> HostState<T> {
    /// Hands one event to the bridge, stopping the loop on the first failure.
    ///
    /// After a failure only the shutdown signal still reaches the target.
    fn deliver(&mut self, event_loop: &ActiveEventLoop, event: HostEvent) {
        if self.failure.is_some() && !delivered_after_failure(&event) {
            return;
        }
        if let Err(err) = self.bridge.handle(event) {
            log::error!("Frame failed, exiting event loop: {err:#}");
            self.fail(event_loop, err);
        }
    }

    fn deliver_native(&mut self, event_loop: &ActiveEventLoop, event: Option<NativeEvent>) {
        if let Some(event) = event {
            self.deliver(event_loop, HostEvent::Native(event));
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    /// Builds the window and attaches graphics to it.
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = self.window_builder.clone().build(event_loop)?;
        self.bridge.graphics_mut().attach(window.handle())?;
        self.window = Some(window);
        Ok(())
    }
}

impl<T: DispatchTarget> ApplicationHandler for HostState<T> {
    /// Called when the application becomes active, including once at startup.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            log::info!("Application resumed. Creating window...");
            if let Err(err) = self.create_window(event_loop) {
                log::error!("Failed to create the application window: {err:#}");
                self.fail(event_loop, err);
                return;
            }
        }
        for signal in RESUMED {
            self.deliver(event_loop, HostEvent::Lifecycle(signal));
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        for signal in SUSPENDED {
            self.deliver(event_loop, HostEvent::Lifecycle(signal));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WinitWindow::id) != Some(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::info!("Window resized to: {}x{}", size.width, size.height);
                self.bridge.graphics_mut().resize(size.width, size.height);
            }
            WindowEvent::Occluded(occluded) => {
                self.deliver(event_loop, HostEvent::Lifecycle(occlusion_signal(occluded)));
            }
            WindowEvent::RedrawRequested => {
                self.deliver(event_loop, HostEvent::Frame);
            }
            WindowEvent::KeyboardInput { event: key, .. } => {
                let native = self.keys.translate(
                    key.physical_key,
                    &key.logical_key,
                    key.state,
                    key.repeat,
                );
                self.deliver_native(event_loop, native);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = pixel_position(position);
                self.cursor = (x, y);
                self.deliver_native(event_loop, Some(NativeEvent::MouseMove { x, y }));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let native = translate_mouse_button(state, button, self.cursor);
                self.deliver_native(event_loop, Some(native));
            }
            WindowEvent::Touch(touch) => {
                let native = self
                    .touches
                    .translate(touch.phase, touch.id, pixel_position(touch.location));
                self.deliver_native(event_loop, native);
            }
            _ => {}
        }
    }

    /// Polls the gamepad and requests the next frame.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let pad_events = self
            .gamepad
            .as_mut()
            .map(GamepadInput::poll)
            .unwrap_or_default();
        for event in pad_events {
            self.deliver(event_loop, HostEvent::Native(event));
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Event loop exiting. Shutting down...");
        self.deliver(event_loop, HostEvent::Lifecycle(LifecycleSignal::Shutdown));
    }
}

/// Whether an event is still worth delivering once a frame has failed.
fn delivered_after_failure(event: &HostEvent) -> bool {
    matches!(event, HostEvent::Lifecycle(LifecycleSignal::Shutdown))
}
