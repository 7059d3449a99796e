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

//! # Hearth Core
//!
//! The platform-independent heart of the Hearth bridge: it turns native input and
//! lifecycle callbacks into a normalized stream for a single [`DispatchTarget`],
//! and drives the visibility-gated frame pump.
//!
//! Nothing in this crate talks to an OS. Windowing, audio and graphics backends
//! live behind the [`Host`], [`AudioSubsystem`] and [`GraphicsSubsystem`] traits.

#![warn(missing_docs)]

pub mod bootstrap;
pub mod bridge;
pub mod callbacks;
pub mod config;
pub mod dispatch;
pub mod frame;
pub mod input;
pub mod lifecycle;
pub mod normalizer;
pub mod state;

#[cfg(test)]
mod testing;

pub use bootstrap::{BootstrapError, Bootstrapper, Host, DEFAULT_CONFIG_PATH};
pub use bridge::{Bridge, HostEvent};
pub use callbacks::{CallbackCategory, CallbackTable, EngineStarted, RegistrationError};
pub use config::{AppConfig, ConfigError};
pub use dispatch::{DispatchTarget, FrameContext, InputSink, LifecycleSink, StartupError};
pub use frame::{AudioSubsystem, FrameOutcome, FramePump, GraphicsSubsystem, RenderState};
pub use input::{Key, NativeKey, Orientation, ScreenRotation, Sensor};
pub use lifecycle::{LifecycleController, LifecycleSignal};
pub use normalizer::{EventNormalizer, NativeEvent};
pub use state::BridgeState;
