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

//! Gamepad polling through `gilrs`.
//!
//! Only the primary pad is forwarded: the first one connected, or the first one to
//! report an event. When it disconnects, the next pad to speak up takes over.

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use hearth_core::NativeEvent;

/// Polls `gilrs` and translates the primary pad's events.
pub struct GamepadInput {
    gilrs: Gilrs,
    primary: Option<GamepadId>,
}

impl GamepadInput {
    /// Opens the platform gamepad backend.
    ///
    /// Returns `None` when no backend can be opened; the application then runs
    /// without gamepad input.
    pub fn new() -> Option<Self> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                log::warn!("Gamepad input is not supported on this platform.");
                dummy
            }
            Err(err) => {
                log::warn!("Failed to open the gamepad backend: {err}");
                return None;
            }
        };

        let primary = gilrs.gamepads().next().map(|(id, pad)| {
            log::info!("Primary gamepad: {} ({id:?})", pad.name());
            id
        });
        Some(Self { gilrs, primary })
    }

    /// Drains pending gamepad events, returning those of the primary pad.
    pub fn poll(&mut self) -> Vec<NativeEvent> {
        let mut events = Vec::new();
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    if self.primary.is_none() {
                        log::info!("Gamepad {id:?} connected and selected as primary.");
                        self.primary = Some(id);
                    }
                }
                EventType::Disconnected => {
                    if self.primary == Some(id) {
                        log::info!("Primary gamepad {id:?} disconnected.");
                        self.primary = None;
                    }
                }
                other => {
                    let primary = *self.primary.get_or_insert(id);
                    if primary == id {
                        events.extend(translate(other));
                    }
                }
            }
        }
        events
    }
}

/// Translates one gamepad event into a bridge event.
///
/// Buttons are reported through their analog value, so digital press and release
/// notifications are ignored to avoid duplicates.
pub fn translate(event: EventType) -> Option<NativeEvent> {
    match event {
        EventType::ButtonChanged(button, value, code) => Some(NativeEvent::GamepadButton {
            button: button_index(button).unwrap_or_else(|| code.into_u32()),
            value,
        }),
        EventType::AxisChanged(axis, value, code) => Some(NativeEvent::GamepadAxis {
            axis: axis_index(axis).unwrap_or_else(|| code.into_u32()),
            value,
        }),
        _ => None,
    }
}

/// The standard-layout index of a button.
pub fn button_index(button: Button) -> Option<u32> {
    let index = match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::LeftTrigger => 4,
        Button::RightTrigger => 5,
        Button::LeftTrigger2 => 6,
        Button::RightTrigger2 => 7,
        Button::Select => 8,
        Button::Start => 9,
        Button::LeftThumb => 10,
        Button::RightThumb => 11,
        Button::DPadUp => 12,
        Button::DPadDown => 13,
        Button::DPadLeft => 14,
        Button::DPadRight => 15,
        Button::Mode => 16,
        _ => return None,
    };
    Some(index)
}

/// The standard-layout index of an axis.
pub fn axis_index(axis: Axis) -> Option<u32> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::RightStickX => Some(2),
        Axis::RightStickY => Some(3),
        _ => None,
    }
}
