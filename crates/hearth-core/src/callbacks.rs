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

//! Bookkeeping of which native callback categories the bridge handles.
//!
//! Hooks (lifecycle, orientation, frame) may be registered at any time during
//! bootstrap. Input categories require an [`EngineStarted`] token, which only a
//! successful [`DispatchTarget::start`] produces: input can never be wired to an
//! engine that failed to start.

use crate::dispatch::{DispatchTarget, StartupError};
use std::fmt;
use thiserror::Error;

/// A category of native callbacks the host can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackCategory {
    /// Foreground, background, resume, pause and shutdown.
    Lifecycle,
    /// Device orientation changes.
    Orientation,
    /// The per-tick frame callback.
    Frame,
    /// Key presses and releases.
    Keyboard,
    /// Mouse buttons and motion.
    Mouse,
    /// Gamepad axes and buttons.
    Gamepad,
    /// Touch surface contacts.
    Surface,
    /// Accelerometer and gyroscope.
    Sensors,
}

impl CallbackCategory {
    /// The categories registered before the engine starts.
    pub const HOOKS: [CallbackCategory; 3] = [
        CallbackCategory::Orientation,
        CallbackCategory::Lifecycle,
        CallbackCategory::Frame,
    ];

    /// The input categories, registered once the engine has started.
    pub const INPUT: [CallbackCategory; 5] = [
        CallbackCategory::Keyboard,
        CallbackCategory::Mouse,
        CallbackCategory::Gamepad,
        CallbackCategory::Surface,
        CallbackCategory::Sensors,
    ];

    /// Whether this category carries user input.
    pub fn is_input(self) -> bool {
        Self::INPUT.contains(&self)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Proof that the dispatch target started successfully.
///
/// Only [`EngineStarted::start`] can create one.
#[derive(Debug)]
pub struct EngineStarted {
    _private: (),
}

impl EngineStarted {
    /// Starts `target`, returning the proof on success.
    pub fn start<T: DispatchTarget + ?Sized>(target: &mut T) -> Result<Self, StartupError> {
        target.start()?;
        Ok(Self { _private: () })
    }
}

/// An error raised when registering a callback category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The category already has a handler.
    #[error("a handler for {0:?} callbacks is already registered")]
    AlreadyRegistered(CallbackCategory),
    /// An input category was registered as a hook, bypassing the engine-started check.
    #[error("{0:?} is an input category and needs a started engine")]
    InputNeedsEngine(CallbackCategory),
}

/// The set of registered callback categories.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct CallbackTable {
    registered: u8,
}

impl CallbackTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a non-input category.
    pub fn register_hook(&mut self, category: CallbackCategory) -> Result<(), RegistrationError> {
        if category.is_input() {
            return Err(RegistrationError::InputNeedsEngine(category));
        }
        self.insert(category)
    }

    /// Registers an input category. Requires proof that the engine started.
    pub fn register_input(
        &mut self,
        category: CallbackCategory,
        _started: &EngineStarted,
    ) -> Result<(), RegistrationError> {
        self.insert(category)
    }

    /// Whether `category` has been registered.
    pub fn is_registered(&self, category: CallbackCategory) -> bool {
        self.registered & category.bit() != 0
    }

    /// Whether any input category has been registered.
    pub fn accepts_input(&self) -> bool {
        CallbackCategory::INPUT
            .iter()
            .any(|category| self.is_registered(*category))
    }

    fn insert(&mut self, category: CallbackCategory) -> Result<(), RegistrationError> {
        if self.is_registered(category) {
            return Err(RegistrationError::AlreadyRegistered(category));
        }
        log::debug!("Registered {category:?} callbacks");
        self.registered |= category.bit();
        Ok(())
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<CallbackCategory> = CallbackCategory::HOOKS
            .iter()
            .chain(CallbackCategory::INPUT.iter())
            .copied()
            .filter(|category| self.is_registered(*category))
            .collect();
        f.debug_struct("CallbackTable")
            .field("registered", &registered)
            .finish()
    }
}
