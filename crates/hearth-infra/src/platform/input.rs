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

//! Provides translation from `winit` input to the bridge's [`NativeEvent`]s.
//!
//! This module acts as an adapter layer, decoupling the bridge from the
//! specific input event format of the `winit` crate.

use hearth_core::{NativeEvent, NativeKey};
use std::collections::HashMap;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase};
use winit::keyboard::{Key, KeyCode, PhysicalKey};

/// Translates a `winit` key transition into a key event.
///
/// Auto-repeated presses are dropped: the bridge forwards one push per physical press.
pub fn translate_key(
    physical: PhysicalKey,
    logical: &Key,
    state: ElementState,
    repeat: bool,
) -> Option<NativeEvent> {
    let character = key_character(physical, logical);
    let code = match physical {
        PhysicalKey::Code(keycode) => map_keycode(keycode, character),
        PhysicalKey::Unidentified(_) => NativeKey::Other(character as u32),
    };

    match state {
        ElementState::Pressed if !repeat => Some(NativeEvent::KeyDown { code, character }),
        ElementState::Released => Some(NativeEvent::KeyUp { code, character }),
        _ => None,
    }
}

/// Translates a mouse button transition at the last known cursor position.
pub fn translate_mouse_button(
    state: ElementState,
    button: MouseButton,
    (x, y): (i32, i32),
) -> NativeEvent {
    let button = map_mouse_button(button);
    match state {
        ElementState::Pressed => NativeEvent::MouseDown { button, x, y },
        ElementState::Released => NativeEvent::MouseUp { button, x, y },
    }
}

/// Truncates a physical position to the bridge's integer pixel coordinates.
pub fn pixel_position(position: PhysicalPosition<f64>) -> (i32, i32) {
    (position.x as i32, position.y as i32)
}

/// Remembers the code and character each held key reported when it went down.
///
/// `winit` resolves the logical key with the modifiers active at each transition,
/// so a key pressed with Shift held and released after Shift reports different
/// characters. Releases reuse what the press reported, so the target always sees a
/// matching push/release pair.
#[derive(Debug, Default)]
pub struct KeySlots {
    held: HashMap<PhysicalKey, (NativeKey, char)>,
}

impl KeySlots {
    /// Creates an empty key table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one key transition, pairing releases with their press.
    ///
    /// A release whose press was never seen keeps its own translation.
    pub fn translate(
        &mut self,
        physical: PhysicalKey,
        logical: &Key,
        state: ElementState,
        repeat: bool,
    ) -> Option<NativeEvent> {
        match translate_key(physical, logical, state, repeat)? {
            NativeEvent::KeyDown { code, character } => {
                self.held.insert(physical, (code, character));
                Some(NativeEvent::KeyDown { code, character })
            }
            NativeEvent::KeyUp { code, character } => {
                let (code, character) = self.held.remove(&physical).unwrap_or((code, character));
                Some(NativeEvent::KeyUp { code, character })
            }
            other => Some(other),
        }
    }

    /// Number of keys currently held.
    pub fn held(&self) -> usize {
        self.held.len()
    }
}

/// Assigns small, reusable contact indices to the host's opaque touch ids.
///
/// A new contact takes the lowest index not held by another active contact, so
/// the first finger is always index 0.
#[derive(Debug, Default)]
pub struct TouchSlots {
    active: HashMap<u64, u32>,
}

impl TouchSlots {
    /// Creates an empty slot table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one `winit` touch phase for contact `id` at `(x, y)`.
    ///
    /// Moves and ends for contacts that never started are dropped.
    pub fn translate(&mut self, phase: TouchPhase, id: u64, (x, y): (i32, i32)) -> Option<NativeEvent> {
        match phase {
            TouchPhase::Started => Some(NativeEvent::TouchStart {
                index: self.acquire(id),
                x,
                y,
            }),
            TouchPhase::Moved => self
                .active
                .get(&id)
                .map(|&index| NativeEvent::TouchMove { index, x, y }),
            TouchPhase::Ended | TouchPhase::Cancelled => self
                .active
                .remove(&id)
                .map(|index| NativeEvent::TouchEnd { index, x, y }),
        }
    }

    /// Number of contacts currently on the surface.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    fn acquire(&mut self, id: u64) -> u32 {
        if let Some(&index) = self.active.get(&id) {
            return index;
        }
        let index = (0..)
            .find(|candidate| !self.active.values().any(|held| held == candidate))
            .unwrap_or_default();
        self.active.insert(id, index);
        index
    }
}

// --- Private Helper Functions ---

/// First code point of the Unicode private use area.
const PRIVATE_USE_BASE: u32 = 0xE000;

/// (Internal) The first character the key produces.
///
/// Function, navigation and lock keys produce no text; they get a distinct
/// private-use character so the target can tell them apart. Every other key
/// without text yields `'\0'`.
fn key_character(physical: PhysicalKey, logical: &Key) -> char {
    if let Some(character) = match logical {
        Key::Character(text) => text.chars().next(),
        _ => None,
    } {
        return character;
    }
    match physical {
        PhysicalKey::Code(keycode) => non_text_index(keycode)
            .and_then(|index| char::from_u32(PRIVATE_USE_BASE + index))
            .unwrap_or('\0'),
        PhysicalKey::Unidentified(_) => '\0',
    }
}

/// (Internal) Position of a textless, non-control key in the private-use block.
fn non_text_index(keycode: KeyCode) -> Option<u32> {
    let index = match keycode {
        KeyCode::F1 => 0,
        KeyCode::F2 => 1,
        KeyCode::F3 => 2,
        KeyCode::F4 => 3,
        KeyCode::F5 => 4,
        KeyCode::F6 => 5,
        KeyCode::F7 => 6,
        KeyCode::F8 => 7,
        KeyCode::F9 => 8,
        KeyCode::F10 => 9,
        KeyCode::F11 => 10,
        KeyCode::F12 => 11,
        KeyCode::F13 => 12,
        KeyCode::F14 => 13,
        KeyCode::F15 => 14,
        KeyCode::F16 => 15,
        KeyCode::F17 => 16,
        KeyCode::F18 => 17,
        KeyCode::F19 => 18,
        KeyCode::F20 => 19,
        KeyCode::F21 => 20,
        KeyCode::F22 => 21,
        KeyCode::F23 => 22,
        KeyCode::F24 => 23,
        KeyCode::Home => 24,
        KeyCode::End => 25,
        KeyCode::PageUp => 26,
        KeyCode::PageDown => 27,
        KeyCode::Insert => 28,
        KeyCode::CapsLock => 29,
        KeyCode::NumLock => 30,
        KeyCode::ScrollLock => 31,
        KeyCode::PrintScreen => 32,
        KeyCode::Pause => 33,
        KeyCode::ContextMenu => 34,
        KeyCode::SuperLeft => 35,
        KeyCode::SuperRight => 36,
        _ => return None,
    };
    Some(index)
}

/// (Internal) Maps a `winit::keyboard::KeyCode` to the bridge's key codes.
fn map_keycode(keycode: KeyCode, character: char) -> NativeKey {
    match keycode {
        KeyCode::ArrowUp => NativeKey::Up,
        KeyCode::ArrowDown => NativeKey::Down,
        KeyCode::ArrowLeft => NativeKey::Left,
        KeyCode::ArrowRight => NativeKey::Right,
        KeyCode::Space => NativeKey::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => NativeKey::Shift,
        KeyCode::Backspace => NativeKey::Backspace,
        KeyCode::Tab => NativeKey::Tab,
        KeyCode::NumpadEnter => NativeKey::Enter,
        KeyCode::Enter => NativeKey::Return,
        KeyCode::ControlLeft | KeyCode::ControlRight => NativeKey::Control,
        KeyCode::AltLeft | KeyCode::AltRight => NativeKey::Alt,
        KeyCode::Escape => NativeKey::Escape,
        KeyCode::Delete => NativeKey::Delete,
        _ => NativeKey::Other(character as u32),
    }
}

/// (Internal) Maps a `winit::event::MouseButton` to the bridge's button index.
fn map_mouse_button(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(id) => u32::from(id),
    }
}
