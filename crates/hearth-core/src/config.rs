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

//! Loading of the project descriptor.
//!
//! The descriptor is a JSON document with a nested `game` object:
//!
//! ```json
//! { "game": { "name": "Demo", "width": 800, "height": 600, "fullscreen": false } }
//! ```
//!
//! Only these four fields are read; everything else in the document is ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The window/application settings extracted from the project descriptor.
///
/// Created once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The application name, used as the window title.
    pub name: String,
    /// The initial window width, in logical pixels. Always greater than zero.
    pub width: u32,
    /// The initial window height, in logical pixels. Always greater than zero.
    pub height: u32,
    /// Whether the window should start fullscreen.
    pub fullscreen: bool,
}

/// An error raised while loading the project descriptor.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The descriptor file could not be read.
    #[error("failed to read project descriptor '{}': {source}", .path.display())]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON, or a required field is missing or mistyped.
    #[error("malformed project descriptor: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field is present and well-typed but its value is unusable.
    #[error("invalid value for 'game.{field}': {reason}")]
    Invalid {
        /// The offending field inside the `game` object.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct ProjectDocument {
    game: GameSection,
}

#[derive(Debug, Deserialize)]
struct GameSection {
    name: String,
    width: f64,
    height: f64,
    #[serde(default)]
    fullscreen: bool,
}

impl AppConfig {
    /// Reads and parses the descriptor at `path`.
    ///
    /// The whole file is read into an owned buffer before parsing, so nothing
    /// is left to release on any error path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Reading project descriptor '{}'", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses a descriptor held in memory.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: ProjectDocument = serde_json::from_str(json)?;
        let game = document.game;

        let config = AppConfig {
            width: dimension("width", game.width)?,
            height: dimension("height", game.height)?,
            name: game.name,
            fullscreen: game.fullscreen,
        };
        log::debug!("Project descriptor parsed: {config:?}");
        Ok(config)
    }
}

/// Truncates a JSON number toward zero and checks it is a usable window dimension.
fn dimension(field: &'static str, value: f64) -> Result<u32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is not a finite number"),
        });
    }
    let truncated = value.trunc();
    if truncated < 1.0 || truncated > f64::from(u32::MAX) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is outside 1..={}", u32::MAX),
        });
    }
    Ok(truncated as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_defaults_to_false() {
        let config =
            AppConfig::from_json(r#"{"game":{"name":"Demo","width":800,"height":600}}"#).unwrap();
        assert_eq!(
            config,
            AppConfig {
                name: "Demo".to_string(),
                width: 800,
                height: 600,
                fullscreen: false,
            }
        );
    }

    #[test]
    fn fullscreen_flag_is_read() {
        let config = AppConfig::from_json(
            r#"{"game":{"name":"Full","width":1920,"height":1080,"fullscreen":true}}"#,
        )
        .unwrap();
        assert!(config.fullscreen);
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let json = r#"{
            "format": 2,
            "game": { "name": "Extra", "width": 320, "height": 240, "assets": ["a.png"] },
            "libraries": []
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.name, "Extra");
        assert_eq!((config.width, config.height), (320, 240));
    }

    #[test]
    fn fractional_dimensions_are_truncated() {
        let config =
            AppConfig::from_json(r#"{"game":{"name":"F","width":800.9,"height":600.2}}"#).unwrap();
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn missing_game_object_is_a_parse_error() {
        let err = AppConfig::from_json(r#"{"name":"Demo"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = AppConfig::from_json(r#"{"game":{"name":"Demo","width":800}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn mistyped_field_is_a_parse_error() {
        let err =
            AppConfig::from_json(r#"{"game":{"name":42,"width":800,"height":600}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = AppConfig::from_json(
            r#"{"game":{"name":"Demo","width":800,"height":600,"fullscreen":"yes"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AppConfig::from_json(r#"{"game":{"name":"Demo","#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let err =
            AppConfig::from_json(r#"{"game":{"name":"Z","width":0,"height":600}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "width", .. }));

        let err =
            AppConfig::from_json(r#"{"game":{"name":"Z","width":800,"height":-4}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "height", .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "hearth-config-load-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"game":{"name":"Disk","width":640,"height":480}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.name, "Disk");
        assert_eq!((config.width, config.height), (640, 480));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let path = std::env::temp_dir().join("hearth-config-does-not-exist.json");
        let err = AppConfig::load(&path).unwrap_err();
        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
