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

//! The startup sequence, from project descriptor to running host loop.

use crate::bridge::Bridge;
use crate::callbacks::{CallbackCategory, CallbackTable, EngineStarted, RegistrationError};
use crate::config::{AppConfig, ConfigError};
use crate::dispatch::{DispatchTarget, StartupError};
use crate::frame::{AudioSubsystem, GraphicsSubsystem, RenderState};
use crate::input::ScreenRotation;
use crate::state::BridgeState;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the project descriptor is read from unless told otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "project.json";

/// The windowing/OS integration the bridge runs inside.
pub trait Host {
    /// The host's audio subsystem.
    type Audio: AudioSubsystem;
    /// The host's graphics subsystem.
    type Graphics: GraphicsSubsystem;

    /// Creates the application window and the audio and graphics subsystems.
    fn create_subsystems(
        &mut self,
        config: &AppConfig,
    ) -> anyhow::Result<(Self::Audio, Self::Graphics)>;

    /// A rotation this platform forces regardless of reported orientation.
    fn forced_rotation(&self) -> Option<ScreenRotation> {
        None
    }

    /// Runs the host loop, feeding `bridge`, until the application stops.
    fn run<T: DispatchTarget>(
        &mut self,
        bridge: Bridge<T, Self::Audio, Self::Graphics>,
    ) -> anyhow::Result<()>;
}

/// A fatal bootstrap failure.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The project descriptor could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The window, audio or graphics subsystem could not be created.
    #[error("failed to create platform subsystems: {0}")]
    Subsystem(#[source] anyhow::Error),
    /// A callback category was registered twice.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    /// The engine reported an error while starting.
    #[error("engine failed to start: {0}")]
    EngineStartup(#[from] StartupError),
    /// The host loop terminated with an error.
    #[error("host loop failed: {0}")]
    Host(#[source] anyhow::Error),
}

impl BootstrapError {
    /// The process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Runs the startup sequence against a [`Host`].
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    config_path: PathBuf,
}

impl Bootstrapper {
    /// Creates a bootstrapper reading the descriptor from `config_path`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// The descriptor path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Boots `target` inside `host` and blocks until the host loop returns.
    ///
    /// Each step is fatal on failure. When the engine fails to start, no input
    /// category is registered and the host loop is never entered.
    pub fn run<H, T>(&self, host: &mut H, mut target: T) -> Result<(), BootstrapError>
    where
        H: Host,
        T: DispatchTarget,
    {
        log::info!("Hearth: Starting...");

        let config = AppConfig::load(&self.config_path)?;

        log::info!(
            "Creating '{}' ({}x{}, fullscreen: {})",
            config.name,
            config.width,
            config.height,
            config.fullscreen
        );
        let (audio, mut graphics) = host
            .create_subsystems(&config)
            .map_err(BootstrapError::Subsystem)?;

        graphics.set_render_state(RenderState::DepthTest, false);

        let mut callbacks = CallbackTable::new();
        for category in CallbackCategory::HOOKS {
            callbacks.register_hook(category)?;
        }

        log::info!("Starting engine");
        let started = EngineStarted::start(&mut target)?;

        for category in CallbackCategory::INPUT {
            callbacks.register_input(category, &started)?;
        }

        let mut state = BridgeState::new();
        if let Some(rotation) = host.forced_rotation() {
            log::info!("Host forces screen rotation {rotation:?}");
            state.set_rotation(rotation);
        }

        let bridge = Bridge::new(target, audio, graphics, state, callbacks);

        log::info!("Starting application");
        host.run(bridge).map_err(BootstrapError::Host)?;
        log::info!("Application stopped");
        Ok(())
    }
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}
