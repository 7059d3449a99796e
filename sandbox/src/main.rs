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

// Hearth Sandbox
// A minimal engine that logs what the bridge delivers.

use hearth_sdk::prelude::*;
use hearth_sdk::{Engine, DEFAULT_CONFIG_PATH};
use std::collections::{HashMap, HashSet};
use std::process::ExitCode;

/// Frames between two status lines.
const STATUS_INTERVAL: u64 = 300;

#[derive(Default)]
struct SandboxApp {
    held_keys: HashSet<Key>,
    touches: HashMap<u32, (i32, i32)>,
    cursor: (i32, i32),
}

impl InputSink for SandboxApp {
    fn push(&mut self, key: Key) {
        log::debug!("Key down: {key:?}");
        self.held_keys.insert(key);
    }

    fn release(&mut self, key: Key) {
        log::debug!("Key up: {key:?}");
        self.held_keys.remove(&key);
    }

    fn mouse_down(&mut self, button: u32, x: i32, y: i32) {
        log::debug!("Mouse button {button} down at ({x}, {y})");
    }

    fn mouse_up(&mut self, button: u32, x: i32, y: i32) {
        log::debug!("Mouse button {button} up at ({x}, {y})");
    }

    fn mouse_move(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn touch_start(&mut self, index: u32, x: i32, y: i32) {
        log::debug!("Touch {index} started at ({x}, {y})");
        self.touches.insert(index, (x, y));
    }

    fn touch_end(&mut self, index: u32, x: i32, y: i32) {
        log::debug!("Touch {index} ended at ({x}, {y})");
        self.touches.remove(&index);
    }

    fn touch_move(&mut self, index: u32, x: i32, y: i32) {
        self.touches.insert(index, (x, y));
    }

    fn gamepad_axis(&mut self, axis: u32, value: f32) {
        log::trace!("Gamepad axis {axis}: {value:.3}");
    }

    fn gamepad_button(&mut self, button: u32, value: f32) {
        log::debug!("Gamepad button {button}: {value:.2}");
    }

    fn sensor_changed(&mut self, sensor: Sensor, x: f32, y: f32, z: f32) {
        log::trace!("{sensor:?}: ({x:.2}, {y:.2}, {z:.2})");
    }
}

impl LifecycleSink for SandboxApp {
    fn foreground(&mut self) {
        log::info!("Sandbox: foreground");
    }

    fn background(&mut self) {
        log::info!("Sandbox: background");
    }

    fn resume(&mut self) {
        log::info!("Sandbox: resume");
    }

    fn pause(&mut self) {
        log::info!("Sandbox: pause");
    }

    fn shutdown(&mut self) {
        log::info!(
            "Sandbox: shutdown ({} key(s) still held)",
            self.held_keys.len()
        );
    }
}

impl DispatchTarget for SandboxApp {
    fn start(&mut self) -> Result<(), StartupError> {
        log::info!("Sandbox engine started.");
        Ok(())
    }

    fn frame(&mut self, context: &FrameContext) {
        if context.frame_index % STATUS_INTERVAL == 0 {
            log::info!(
                "Frame {} (rotation {}°): cursor {:?}, {} key(s), {} touch(es)",
                context.frame_index,
                context.rotation.degrees(),
                self.cursor,
                self.held_keys.len(),
                self.touches.len()
            );
        }
    }
}

fn main() -> ExitCode {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    Engine::run_with_config(config_path, SandboxApp::default())
}
