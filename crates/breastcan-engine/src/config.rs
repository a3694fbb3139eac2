//! Rule thresholds.
//!
//! Resolved once at startup (defaults or a TOML file) and passed into the
//! engine; rules never read the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use breastcan_model::PerformanceStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Oncotype DX scores strictly below this are low risk (chemotherapy likely unnecessary).
    pub genomic_low_risk_threshold: u32,
    /// ECOG status at or above which the general-notes gate fires.
    pub poor_performance_status: u8,
    /// Ages strictly above this trigger the frailty note.
    pub frailty_age: u32,
    /// Largest tumor (cm) still routed to breast-conserving surgery.
    pub breast_conserving_max_size_cm: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            genomic_low_risk_threshold: 26,
            poor_performance_status: 3,
            frailty_age: 75,
            breast_conserving_max_size_cm: 5.0,
        }
    }
}

impl EngineConfig {
    /// Load and validate a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poor_performance_status > PerformanceStatus::MAX {
            return Err(ConfigError::Invalid {
                field: "poor_performance_status",
                message: format!(
                    "must be between 0 and {}, got {}",
                    PerformanceStatus::MAX,
                    self.poor_performance_status
                ),
            });
        }
        if !self.breast_conserving_max_size_cm.is_finite()
            || self.breast_conserving_max_size_cm <= 0.0
        {
            return Err(ConfigError::Invalid {
                field: "breast_conserving_max_size_cm",
                message: format!(
                    "must be a positive number, got {}",
                    self.breast_conserving_max_size_cm
                ),
            });
        }
        Ok(())
    }
}
