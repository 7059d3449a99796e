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

//! Translation of native input callbacks into [`InputSink`] calls.
//!
//! Every [`NativeEvent`] produces exactly one call on the sink, except orientation
//! changes, which only update the bridge's screen rotation. Normalization cannot
//! fail: input the bridge does not recognise falls through to a passthrough arm.

use crate::callbacks::CallbackCategory;
use crate::dispatch::InputSink;
use crate::input::{Key, NativeKey, Orientation, Sensor};
use crate::state::BridgeState;

/// A raw input callback, in the shape the host reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    /// A key went down. `character` is the text the key produced, if any.
    KeyDown {
        /// The host key code.
        code: NativeKey,
        /// The character produced by the key.
        character: char,
    },
    /// A key went up.
    KeyUp {
        /// The host key code.
        code: NativeKey,
        /// The character produced by the key.
        character: char,
    },
    /// A mouse button was pressed.
    MouseDown {
        /// The button index.
        button: u32,
        /// Cursor x position.
        x: i32,
        /// Cursor y position.
        y: i32,
    },
    /// A mouse button was released.
    MouseUp {
        /// The button index.
        button: u32,
        /// Cursor x position.
        x: i32,
        /// Cursor y position.
        y: i32,
    },
    /// The mouse cursor moved.
    MouseMove {
        /// Cursor x position.
        x: i32,
        /// Cursor y position.
        y: i32,
    },
    /// A contact touched the surface.
    TouchStart {
        /// The contact index.
        index: u32,
        /// Contact x position.
        x: i32,
        /// Contact y position.
        y: i32,
    },
    /// A contact left the surface.
    TouchEnd {
        /// The contact index.
        index: u32,
        /// Contact x position.
        x: i32,
        /// Contact y position.
        y: i32,
    },
    /// A contact moved.
    TouchMove {
        /// The contact index.
        index: u32,
        /// Contact x position.
        x: i32,
        /// Contact y position.
        y: i32,
    },
    /// A gamepad axis changed.
    GamepadAxis {
        /// The axis index.
        axis: u32,
        /// The analog reading.
        value: f32,
    },
    /// A gamepad button changed.
    GamepadButton {
        /// The button index.
        button: u32,
        /// The button pressure.
        value: f32,
    },
    /// The accelerometer reported a new vector.
    Accelerometer {
        /// X component.
        x: f32,
        /// Y component.
        y: f32,
        /// Z component.
        z: f32,
    },
    /// The gyroscope reported a new vector.
    Gyroscope {
        /// X component.
        x: f32,
        /// Y component.
        y: f32,
        /// Z component.
        z: f32,
    },
    /// The device orientation changed.
    Orientation(Orientation),
}

impl NativeEvent {
    /// The callback category a host must have registered to deliver this event.
    pub fn category(&self) -> CallbackCategory {
        match self {
            NativeEvent::KeyDown { .. } | NativeEvent::KeyUp { .. } => CallbackCategory::Keyboard,
            NativeEvent::MouseDown { .. }
            | NativeEvent::MouseUp { .. }
            | NativeEvent::MouseMove { .. } => CallbackCategory::Mouse,
            NativeEvent::TouchStart { .. }
            | NativeEvent::TouchEnd { .. }
            | NativeEvent::TouchMove { .. } => CallbackCategory::Surface,
            NativeEvent::GamepadAxis { .. } | NativeEvent::GamepadButton { .. } => {
                CallbackCategory::Gamepad
            }
            NativeEvent::Accelerometer { .. } | NativeEvent::Gyroscope { .. } => {
                CallbackCategory::Sensors
            }
            NativeEvent::Orientation(_) => CallbackCategory::Orientation,
        }
    }
}

/// Maps native callbacks onto an [`InputSink`].
///
/// The normalizer itself is stateless; the little state it maintains (the shift
/// modifier and the screen rotation) lives in the [`BridgeState`] it is handed.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventNormalizer;

impl EventNormalizer {
    /// Forwards one native event to `sink`.
    pub fn dispatch<S: InputSink + ?Sized>(
        state: &mut BridgeState,
        sink: &mut S,
        event: NativeEvent,
    ) {
        match event {
            NativeEvent::KeyDown { code, character } => {
                Self::key_down(state, sink, code, character)
            }
            NativeEvent::KeyUp { code, character } => Self::key_up(state, sink, code, character),
            NativeEvent::MouseDown { button, x, y } => sink.mouse_down(button, x, y),
            NativeEvent::MouseUp { button, x, y } => sink.mouse_up(button, x, y),
            NativeEvent::MouseMove { x, y } => sink.mouse_move(x, y),
            NativeEvent::TouchStart { index, x, y } => sink.touch_start(index, x, y),
            NativeEvent::TouchEnd { index, x, y } => sink.touch_end(index, x, y),
            NativeEvent::TouchMove { index, x, y } => sink.touch_move(index, x, y),
            NativeEvent::GamepadAxis { axis, value } => sink.gamepad_axis(axis, value),
            NativeEvent::GamepadButton { button, value } => sink.gamepad_button(button, value),
            NativeEvent::Accelerometer { x, y, z } => {
                sink.sensor_changed(Sensor::Accelerometer, x, y, z)
            }
            NativeEvent::Gyroscope { x, y, z } => sink.sensor_changed(Sensor::Gyroscope, x, y, z),
            NativeEvent::Orientation(orientation) => Self::orientation(state, orientation),
        }
    }

    /// Handles a key press, setting the shift modifier when Shift goes down.
    pub fn key_down<S: InputSink + ?Sized>(
        state: &mut BridgeState,
        sink: &mut S,
        code: NativeKey,
        character: char,
    ) {
        let key = Self::normalize_key(code, character);
        log::trace!("key down {code:?} -> {key:?}");
        sink.push(key);
        if key == Key::Shift {
            state.set_shift_held(true);
        }
    }

    /// Handles a key release, clearing the shift modifier when Shift goes up.
    pub fn key_up<S: InputSink + ?Sized>(
        state: &mut BridgeState,
        sink: &mut S,
        code: NativeKey,
        character: char,
    ) {
        let key = Self::normalize_key(code, character);
        log::trace!("key up {code:?} -> {key:?}");
        sink.release(key);
        if key == Key::Shift {
            state.set_shift_held(false);
        }
    }

    /// Updates the screen rotation. [`Orientation::Unknown`] leaves it unchanged.
    pub fn orientation(state: &mut BridgeState, orientation: Orientation) {
        match orientation.rotation() {
            Some(rotation) => {
                log::debug!("Orientation {orientation:?}: screen rotation {rotation:?}");
                state.set_rotation(rotation);
            }
            None => log::debug!("Orientation unknown, keeping {:?}", state.rotation()),
        }
    }

    /// The normalized key for a native code. Presses and releases share this
    /// table, so every push has a matching release.
    pub fn normalize_key(code: NativeKey, character: char) -> Key {
        match code {
            NativeKey::Up => Key::Up,
            NativeKey::Down => Key::Down,
            NativeKey::Left => Key::Left,
            NativeKey::Right => Key::Right,
            NativeKey::Space => Key::Char(' '),
            NativeKey::Shift => Key::Shift,
            NativeKey::Backspace => Key::Backspace,
            NativeKey::Tab => Key::Tab,
            NativeKey::Enter | NativeKey::Return => Key::Enter,
            NativeKey::Control => Key::Control,
            NativeKey::Alt => Key::Alt,
            NativeKey::Escape => Key::Escape,
            NativeKey::Delete => Key::Delete,
            NativeKey::Other(_) => Key::Char(character),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScreenRotation;
    use crate::testing::{Call, RecordingTarget};
    use approx::assert_relative_eq;

    fn press_and_release(code: NativeKey, character: char) -> (Vec<Call>, BridgeState) {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();
        EventNormalizer::dispatch(&mut state, &mut target, NativeEvent::KeyDown { code, character });
        EventNormalizer::dispatch(&mut state, &mut target, NativeEvent::KeyUp { code, character });
        (target.calls, state)
    }

    #[test]
    fn control_keys_produce_named_push_release_pairs() {
        let expected = [
            (NativeKey::Up, Key::Up),
            (NativeKey::Down, Key::Down),
            (NativeKey::Left, Key::Left),
            (NativeKey::Right, Key::Right),
            (NativeKey::Space, Key::Char(' ')),
            (NativeKey::Shift, Key::Shift),
            (NativeKey::Backspace, Key::Backspace),
            (NativeKey::Tab, Key::Tab),
            (NativeKey::Enter, Key::Enter),
            (NativeKey::Return, Key::Enter),
            (NativeKey::Control, Key::Control),
            (NativeKey::Alt, Key::Alt),
            (NativeKey::Escape, Key::Escape),
            (NativeKey::Delete, Key::Delete),
        ];
        assert_eq!(expected.len(), NativeKey::CONTROL_KEYS.len());

        for (code, key) in expected {
            // The character is deliberately misleading: control keys must ignore it.
            let (calls, _) = press_and_release(code, 'x');
            assert_eq!(calls, vec![Call::Push(key), Call::Release(key)], "{code:?}");
        }
    }

    #[test]
    fn other_keys_pass_the_character_through() {
        for (raw, character) in [(65, 'a'), (49, '1'), (0, 'é'), (u32::MAX, '\u{0}')] {
            let (calls, _) = press_and_release(NativeKey::Other(raw), character);
            assert_eq!(
                calls,
                vec![
                    Call::Push(Key::Char(character)),
                    Call::Release(Key::Char(character))
                ]
            );
        }
    }

    #[test]
    fn shift_modifier_tracks_press_and_release() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();
        assert!(!state.shift_held());

        EventNormalizer::key_down(&mut state, &mut target, NativeKey::Shift, '\0');
        assert!(state.shift_held());

        // Unrelated keys leave the modifier alone.
        EventNormalizer::key_down(&mut state, &mut target, NativeKey::Other(65), 'A');
        EventNormalizer::key_up(&mut state, &mut target, NativeKey::Other(65), 'A');
        assert!(state.shift_held());

        EventNormalizer::key_up(&mut state, &mut target, NativeKey::Shift, '\0');
        assert!(!state.shift_held());
    }

    #[test]
    fn pointer_events_are_passed_through_unchanged() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();
        let events = [
            NativeEvent::MouseDown { button: 2, x: 10, y: -5 },
            NativeEvent::MouseMove { x: 11, y: -4 },
            NativeEvent::MouseUp { button: 2, x: 12, y: -3 },
        ];
        for event in events {
            EventNormalizer::dispatch(&mut state, &mut target, event);
        }
        assert_eq!(
            target.calls,
            vec![
                Call::MouseDown(2, 10, -5),
                Call::MouseMove(11, -4),
                Call::MouseUp(2, 12, -3),
            ]
        );
    }

    #[test]
    fn touch_indices_are_never_conflated() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();
        let events = [
            NativeEvent::TouchStart { index: 0, x: 1, y: 1 },
            NativeEvent::TouchStart { index: 1, x: 50, y: 50 },
            NativeEvent::TouchMove { index: 1, x: 55, y: 52 },
            NativeEvent::TouchMove { index: 0, x: 2, y: 3 },
            NativeEvent::TouchEnd { index: 0, x: 2, y: 3 },
            NativeEvent::TouchEnd { index: 1, x: 55, y: 52 },
        ];
        for event in events {
            EventNormalizer::dispatch(&mut state, &mut target, event);
        }
        assert_eq!(
            target.calls,
            vec![
                Call::TouchStart(0, 1, 1),
                Call::TouchStart(1, 50, 50),
                Call::TouchMove(1, 55, 52),
                Call::TouchMove(0, 2, 3),
                Call::TouchEnd(0, 2, 3),
                Call::TouchEnd(1, 55, 52),
            ]
        );
    }

    #[test]
    fn gamepad_and_sensor_values_are_forwarded() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();
        EventNormalizer::dispatch(
            &mut state,
            &mut target,
            NativeEvent::GamepadAxis { axis: 3, value: -0.25 },
        );
        EventNormalizer::dispatch(
            &mut state,
            &mut target,
            NativeEvent::GamepadButton { button: 7, value: 0.5 },
        );
        EventNormalizer::dispatch(
            &mut state,
            &mut target,
            NativeEvent::Accelerometer { x: 0.1, y: 9.81, z: -0.2 },
        );
        EventNormalizer::dispatch(
            &mut state,
            &mut target,
            NativeEvent::Gyroscope { x: 1.5, y: 0.0, z: -1.5 },
        );

        match &target.calls[..] {
            [Call::GamepadAxis(3, axis), Call::GamepadButton(7, button), Call::Sensor(Sensor::Accelerometer, ax, ay, az), Call::Sensor(Sensor::Gyroscope, gx, gy, gz)] =>
            {
                assert_relative_eq!(*axis, -0.25);
                assert_relative_eq!(*button, 0.5);
                assert_relative_eq!(*ax, 0.1);
                assert_relative_eq!(*ay, 9.81);
                assert_relative_eq!(*az, -0.2);
                assert_relative_eq!(*gx, 1.5);
                assert_relative_eq!(*gy, 0.0);
                assert_relative_eq!(*gz, -1.5);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[test]
    fn orientation_updates_rotation_without_calling_the_sink() {
        let mut state = BridgeState::new();
        let mut target = RecordingTarget::new();

        let cases = [
            (Orientation::LandscapeLeft, ScreenRotation::Rotation270),
            (Orientation::LandscapeRight, ScreenRotation::Rotation90),
            (Orientation::PortraitUpsideDown, ScreenRotation::Rotation180),
            (Orientation::Portrait, ScreenRotation::None),
        ];
        for (orientation, rotation) in cases {
            EventNormalizer::dispatch(&mut state, &mut target, NativeEvent::Orientation(orientation));
            assert_eq!(state.rotation(), rotation);
        }
        assert!(target.calls.is_empty());
    }

    #[test]
    fn unknown_orientation_keeps_the_current_rotation() {
        let mut state = BridgeState::new();
        EventNormalizer::orientation(&mut state, Orientation::LandscapeRight);
        EventNormalizer::orientation(&mut state, Orientation::Unknown);
        EventNormalizer::orientation(&mut state, Orientation::Unknown);
        assert_eq!(state.rotation(), ScreenRotation::Rotation90);
    }

    #[test]
    fn categories_match_event_kinds() {
        let key = NativeEvent::KeyDown {
            code: NativeKey::Up,
            character: '\0',
        };
        assert_eq!(key.category(), CallbackCategory::Keyboard);
        assert_eq!(
            NativeEvent::MouseMove { x: 0, y: 0 }.category(),
            CallbackCategory::Mouse
        );
        assert_eq!(
            NativeEvent::TouchEnd { index: 0, x: 0, y: 0 }.category(),
            CallbackCategory::Surface
        );
        assert_eq!(
            NativeEvent::GamepadAxis { axis: 0, value: 0.0 }.category(),
            CallbackCategory::Gamepad
        );
        assert_eq!(
            NativeEvent::Gyroscope { x: 0.0, y: 0.0, z: 0.0 }.category(),
            CallbackCategory::Sensors
        );
        assert_eq!(
            NativeEvent::Orientation(Orientation::Unknown).category(),
            CallbackCategory::Orientation
        );
    }
}
