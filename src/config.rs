/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How function parameters are bound during a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoping {
    /// Parameters are written into the single global table and removed,
    /// unconditionally, when the call ends. A global that shares a name
    /// with a parameter is lost after the call, and nested calls sharing a
    /// parameter name overwrite each other.
    #[default]
    Shared,

    /// Every call pushes a frame holding only its parameters; the frame is
    /// popped when the call ends, successfully or not. `ref` and `fn` in a
    /// body still bind globally, unless they rebind one of the call's own
    /// parameters.
    Frames,
}

/// Engine settings a host can supply, usually as JSON:
///
/// ```json
/// {
///   "scoping": "frames",
///   "max_call_depth": 64,
///   "max_nesting_depth": 32,
///   "max_loop_iterations": 100000,
///   "constants": { "TAX": 0.2 }
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoping: Scoping,

    /// Nested calls deeper than this fail with `CallDepthExceeded`.
    pub max_call_depth: usize,

    /// Parentheses, call argument lists and blocks nested deeper than this
    /// fail to parse with `NestingTooDeep`.
    pub max_nesting_depth: usize,

    /// A single loop running more iterations than this fails with
    /// `IterationLimitExceeded`. `None` means unbounded.
    pub max_loop_iterations: Option<u64>,

    /// Extra variables seeded into the global frame next to `PI` and `E`.
    pub constants: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoping: Scoping::Shared,
            max_call_depth: 256,
            max_nesting_depth: 128,
            max_loop_iterations: None,
            constants: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_json_str(r#"{ "max_call_depth": 8 }"#).unwrap();
        assert_eq!(
            config,
            Config {
                max_call_depth: 8,
                ..Config::default()
            }
        );
    }

    #[test]
    fn full_config() {
        let config = Config::from_json_str(
            r#"{
                "scoping": "shared",
                "max_loop_iterations": 10,
                "constants": { "TAX": 0.2 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.scoping, Scoping::Shared);
        assert_eq!(config.max_nesting_depth, 128);
        assert_eq!(config.max_loop_iterations, Some(10));
        assert_eq!(config.constants.get("TAX"), Some(&0.2));
    }

    #[test]
    fn default_scoping_is_the_shared_table() {
        assert_eq!(Config::default().scoping, Scoping::Shared);
        let config = Config::from_json_str(r#"{ "scoping": "frames" }"#).unwrap();
        assert_eq!(config.scoping, Scoping::Frames);
    }

    #[test]
    fn unknown_scoping_is_rejected() {
        assert!(matches!(
            Config::from_json_str(r#"{ "scoping": "dynamic" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
