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

//! Input vocabularies shared by hosts and dispatch targets.
//!
//! [`NativeKey`] and [`Orientation`] describe what a host reports. [`Key`],
//! [`Sensor`] and [`ScreenRotation`] describe what a dispatch target receives.

/// A key code as reported by the host platform.
///
/// Only the control keys the bridge treats specially get their own variant.
/// Every other key is carried as [`NativeKey::Other`] with the host's raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKey {
    /// The up arrow.
    Up,
    /// The down arrow.
    Down,
    /// The left arrow.
    Left,
    /// The right arrow.
    Right,
    /// The space bar.
    Space,
    /// Either shift key.
    Shift,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// The keypad Enter key.
    Enter,
    /// The main Return key.
    Return,
    /// Either control key.
    Control,
    /// Either alt/option key.
    Alt,
    /// Escape.
    Escape,
    /// Forward delete.
    Delete,
    /// Any other key, identified by the host's raw code.
    Other(u32),
}

impl NativeKey {
    /// Every named control key, in declaration order.
    pub const CONTROL_KEYS: [NativeKey; 14] = [
        NativeKey::Up,
        NativeKey::Down,
        NativeKey::Left,
        NativeKey::Right,
        NativeKey::Space,
        NativeKey::Shift,
        NativeKey::Backspace,
        NativeKey::Tab,
        NativeKey::Enter,
        NativeKey::Return,
        NativeKey::Control,
        NativeKey::Alt,
        NativeKey::Escape,
        NativeKey::Delete,
    ];
}

/// A normalized key, as delivered to a dispatch target.
///
/// Control keys always arrive as named variants so targets never have to
/// recognise them by character code. Everything else is a [`Key::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The up arrow.
    Up,
    /// The down arrow.
    Down,
    /// The left arrow.
    Left,
    /// The right arrow.
    Right,
    /// Shift.
    Shift,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Enter or Return.
    Enter,
    /// Control.
    Control,
    /// Alt.
    Alt,
    /// Escape.
    Escape,
    /// Delete.
    Delete,
    /// A printable character, including the space produced by the space bar.
    Char(char),
}

/// A motion sensor reporting a three-axis vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    /// Linear acceleration.
    Accelerometer,
    /// Angular velocity.
    Gyroscope,
}

impl Sensor {
    /// The numeric sensor id dispatch targets key on.
    pub fn id(self) -> u32 {
        match self {
            Sensor::Accelerometer => 0,
            Sensor::Gyroscope => 1,
        }
    }
}

/// The physical orientation of the device, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rotated so the top of the device points left.
    LandscapeLeft,
    /// Rotated so the top of the device points right.
    LandscapeRight,
    /// Upright.
    Portrait,
    /// Upside down.
    PortraitUpsideDown,
    /// The host could not determine the orientation.
    Unknown,
}

impl Orientation {
    /// The screen rotation matching this orientation, or `None` for [`Orientation::Unknown`].
    pub fn rotation(self) -> Option<ScreenRotation> {
        match self {
            Orientation::LandscapeLeft => Some(ScreenRotation::Rotation270),
            Orientation::LandscapeRight => Some(ScreenRotation::Rotation90),
            Orientation::Portrait => Some(ScreenRotation::None),
            Orientation::PortraitUpsideDown => Some(ScreenRotation::Rotation180),
            Orientation::Unknown => None,
        }
    }
}

/// The rotation a dispatch target should apply to its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenRotation {
    /// No rotation.
    #[default]
    None,
    /// A quarter turn.
    Rotation90,
    /// A half turn.
    Rotation180,
    /// Three quarter turns.
    Rotation270,
}

impl ScreenRotation {
    /// The rotation angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            ScreenRotation::None => 0,
            ScreenRotation::Rotation90 => 90,
            ScreenRotation::Rotation180 => 180,
            ScreenRotation::Rotation270 => 270,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_orientations_map_onto_distinct_rotations() {
        let known = [
            Orientation::LandscapeLeft,
            Orientation::LandscapeRight,
            Orientation::Portrait,
            Orientation::PortraitUpsideDown,
        ];
        let rotations: HashSet<ScreenRotation> =
            known.iter().filter_map(|o| o.rotation()).collect();
        assert_eq!(rotations.len(), 4);
        assert_eq!(Orientation::Unknown.rotation(), None);
    }

    #[test]
    fn rotation_degrees() {
        assert_eq!(ScreenRotation::default().degrees(), 0);
        assert_eq!(ScreenRotation::Rotation90.degrees(), 90);
        assert_eq!(ScreenRotation::Rotation180.degrees(), 180);
        assert_eq!(ScreenRotation::Rotation270.degrees(), 270);
    }

    #[test]
    fn sensor_ids() {
        assert_eq!(Sensor::Accelerometer.id(), 0);
        assert_eq!(Sensor::Gyroscope.id(), 1);
    }
}
