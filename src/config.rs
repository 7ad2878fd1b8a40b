// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Engine tunables.
//!
//! Every field has a default, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "link_threshold": 24.0, "boundary_tolerance": 0.05 }
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_LINK_THRESHOLD: f64 = 20.0;
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 0.02;
pub const DEFAULT_PARALLEL_EPSILON: f64 = 0.01;
pub const DEFAULT_REFERENCE_INTERVAL_MS: f64 = 1000.0;
pub const DEFAULT_HIT_ACCURACY: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// View-space distance under which marks link on drag end. Two marks in one region whose
    /// ends are both this close count as the same mark.
    pub link_threshold: f64,
    /// Region-relative y distance from a boundary that still counts as touching it.
    pub boundary_tolerance: f64,
    /// Sine of the largest angle between two same-region marks considered parallel.
    pub parallel_epsilon: f64,
    /// Duration the calibration reference span stands for, in milliseconds.
    pub reference_interval_ms: f64,
    /// View-space radius used when hit-testing marks.
    pub hit_accuracy: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            link_threshold: DEFAULT_LINK_THRESHOLD,
            boundary_tolerance: DEFAULT_BOUNDARY_TOLERANCE,
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
            reference_interval_ms: DEFAULT_REFERENCE_INTERVAL_MS,
            hit_accuracy: DEFAULT_HIT_ACCURACY,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Json { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json { path: None, source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("link_threshold", self.link_threshold),
            ("parallel_epsilon", self.parallel_epsilon),
            ("reference_interval_ms", self.reference_interval_ms),
            ("hit_accuracy", self.hit_accuracy),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if !(0.0..0.5).contains(&self.boundary_tolerance) {
            return Err(ConfigError::Invalid {
                field: "boundary_tolerance",
                value: self.boundary_tolerance,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Invalid {
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Json { path: Some(path), source } => {
                write!(f, "invalid config json in {}: {source}", path.display())
            }
            Self::Json { path: None, source } => write!(f, "invalid config json: {source}"),
            Self::Invalid { field, value } => write!(f, "invalid config value {field}={value}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}
