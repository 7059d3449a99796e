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

//! The public-facing entry point of Hearth.
//! An engine implements [`DispatchTarget`] and hands itself to [`Engine::run`],
//! which boots the desktop host and blocks until the application stops.

use hearth_core::{BootstrapError, Bootstrapper, DispatchTarget, Host};
use hearth_infra::WinitHost;
use std::path::PathBuf;
use std::process::ExitCode;

pub mod prelude {
    //! Everything an engine needs to implement [`DispatchTarget`](hearth_core::DispatchTarget).
    pub use hearth_core::{
        DispatchTarget, FrameContext, InputSink, Key, LifecycleSink, ScreenRotation, Sensor,
        StartupError,
    };
}

pub use hearth_core::DEFAULT_CONFIG_PATH;

/// The public entry point for running an engine.
pub struct Engine;

impl Engine {
    /// Boots `target` with the project descriptor at [`DEFAULT_CONFIG_PATH`].
    pub fn run<T: DispatchTarget>(target: T) -> ExitCode {
        Self::run_with_config(DEFAULT_CONFIG_PATH, target)
    }

    /// Boots `target` with the project descriptor at `config_path`.
    ///
    /// Returns the process exit status: success once the application stops
    /// normally, and the failure's status otherwise.
    pub fn run_with_config<T: DispatchTarget>(
        config_path: impl Into<PathBuf>,
        target: T,
    ) -> ExitCode {
        Self::run_on(&mut WinitHost::new(), Bootstrapper::new(config_path), target)
    }

    /// Boots `target` inside an arbitrary host.
    pub fn run_on<H: Host, T: DispatchTarget>(
        host: &mut H,
        bootstrapper: Bootstrapper,
        target: T,
    ) -> ExitCode {
        log::info!("Hearth SDK: Starting...");
        match bootstrapper.run(host, target) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => ExitCode::from(report(err)),
        }
    }
}

/// Reports a bootstrap failure and returns its exit status.
///
/// An engine startup failure is printed to stderr as `Error <message>`; every
/// other failure is logged with its full cause chain.
fn report(err: BootstrapError) -> u8 {
    let code = err.exit_code();
    match startup_message(&err) {
        Some(message) => eprintln!("{message}"),
        None => log::error!("{:#}", anyhow::Error::from(err)),
    }
    code
}

/// The stderr line for an engine startup failure.
fn startup_message(err: &BootstrapError) -> Option<String> {
    match err {
        BootstrapError::EngineStartup(startup) => Some(format!("Error {}", startup.message())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{ConfigError, StartupError};

    #[test]
    fn engine_startup_failures_are_printed_with_the_engine_message() {
        let err = BootstrapError::EngineStartup(StartupError::new("missing asset"));
        assert_eq!(startup_message(&err).as_deref(), Some("Error missing asset"));
    }

    #[test]
    fn other_failures_are_only_logged() {
        let err = BootstrapError::Config(ConfigError::Invalid {
            field: "width",
            reason: "must be at least 1".to_string(),
        });
        assert_eq!(startup_message(&err), None);
    }

    #[test]
    fn failures_report_status_one() {
        let err = BootstrapError::EngineStartup(StartupError::new("boom"));
        assert_eq!(report(err), 1);
    }
}
