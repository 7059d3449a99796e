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

//! The bridge's mutable state.

use crate::input::ScreenRotation;

/// The only mutable state the bridge keeps between callbacks.
///
/// Each field has a single writer:
/// - `visible` and `shut_down`: the [`LifecycleController`](crate::LifecycleController).
/// - `shift_held`: key normalization in the [`EventNormalizer`](crate::EventNormalizer).
/// - `rotation`: orientation normalization, and the bootstrapper's forced
///   orientation step before the run loop starts.
///
/// Outside the crate the state is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeState {
    visible: bool,
    shift_held: bool,
    rotation: ScreenRotation,
    shut_down: bool,
}

impl BridgeState {
    /// Creates the startup state: visible, no modifiers held, no rotation.
    pub fn new() -> Self {
        Self {
            visible: true,
            shift_held: false,
            rotation: ScreenRotation::None,
            shut_down: false,
        }
    }

    /// Whether the frame pump should render.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a shift key is currently held.
    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    /// The current screen rotation.
    pub fn rotation(&self) -> ScreenRotation {
        self.rotation
    }

    /// Whether the shutdown notification has been delivered.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_shift_held(&mut self, held: bool) {
        self.shift_held = held;
    }

    pub(crate) fn set_rotation(&mut self, rotation: ScreenRotation) {
        self.rotation = rotation;
    }

    pub(crate) fn mark_shut_down(&mut self) {
        self.shut_down = true;
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}
