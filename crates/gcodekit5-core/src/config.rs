//! Startup configuration: the defaults a fresh [`crate::modal_state::ModalState`]
//! falls back to when no configuration file is present, or a key is absent
//! from one that is.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::modal_state::{ModalState, Units};
use crate::taxonomy::Plane;

/// Interpreter startup defaults, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StartupConfig {
    /// Startup length units: `"mm"` or `"in"`.
    pub units: String,
    /// Startup plane: `"xy"`, `"xz"`, or `"yz"`.
    pub plane: String,
    /// Startup coordinate system, 1-9.
    pub coordinate_system: u32,
    /// Path to the file persisted numbered parameters (home positions, tool
    /// table, offsets) are loaded from and saved to across program resets.
    pub parameter_file: Option<String>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        StartupConfig {
            units: "mm".to_string(),
            plane: "xy".to_string(),
            coordinate_system: 1,
            parameter_file: None,
        }
    }
}

impl StartupConfig {
    /// Load configuration from `path`. A missing file silently falls back
    /// to [`StartupConfig::default`] (logged at `debug`); a malformed file
    /// is a [`ConfigError`] (logged at `warn` before being returned).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no startup configuration file, using defaults");
                return Ok(StartupConfig::default());
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: err,
                })
            }
        };

        toml::from_str(&text).map_err(|err| {
            warn!(path = %path.display(), error = %err, "malformed startup configuration");
            ConfigError::Malformed(err)
        })
    }

    /// Build a fresh [`ModalState`] reflecting this configuration's
    /// startup units, plane, and coordinate system.
    pub fn build_modal_state(&self) -> Result<ModalState, ConfigError> {
        let mut modal = ModalState::new();

        modal.units = match self.units.as_str() {
            "mm" => Units::Millimeters,
            "in" => Units::Inches,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "units".to_string(),
                    value: other.to_string(),
                })
            }
        };

        modal.plane = match self.plane.as_str() {
            "xy" => Plane::Xy,
            "xz" => Plane::Xz,
            "yz" => Plane::Yz,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "plane".to_string(),
                    value: other.to_string(),
                })
            }
        };

        if !(1..=9).contains(&self.coordinate_system) {
            return Err(ConfigError::InvalidValue {
                key: "coordinate_system".to_string(),
                value: self.coordinate_system.to_string(),
            });
        }
        modal.params.cs_index = self.coordinate_system;

        Ok(modal)
    }
}
