//! Property casting configuration
//!
//! The defaults describe the value range a JVM-backed graph server accepts
//! (signed 64-bit integers). A YAML document can narrow those bounds:
//!
//! ```yaml
//! integer_min: -1000
//! integer_max: 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid integer bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: i64, max: i64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Bounds applied by the property caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastConfig {
    /// Smallest integer accepted as a property value
    pub integer_min: i64,
    /// Largest integer accepted as a property value
    pub integer_max: i64,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            integer_min: i64::MIN,
            integer_max: i64::MAX,
        }
    }
}

impl CastConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        let config: CastConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        debug!(
            "Parsed cast config: integer range [{}, {}]",
            config.integer_min, config.integer_max
        );
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading cast config from {:?}", path);
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.integer_min > self.integer_max {
            return Err(ConfigError::InvalidBounds {
                min: self.integer_min,
                max: self.integer_max,
            });
        }
        Ok(())
    }

    /// Whether an integer of any width lies inside the configured bounds
    pub fn accepts_integer(&self, value: i128) -> bool {
        i128::from(self.integer_min) <= value && value <= i128::from(self.integer_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_bounds() {
        let config = CastConfig::default();
        assert!(config.accepts_integer(i64::MIN as i128));
        assert!(config.accepts_integer(i64::MAX as i128));
        assert!(!config.accepts_integer(i64::MIN as i128 - 1));
        assert!(!config.accepts_integer(i64::MAX as i128 + 1));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CastConfig::from_yaml_str("integer_max: 100\n").unwrap();
        assert_eq!(config.integer_min, i64::MIN);
        assert_eq!(config.integer_max, 100);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = CastConfig::from_yaml_str("integer_min: 10\ninteger_max: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { min: 10, max: 1 }));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = CastConfig::from_yaml_str("integer_min: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "integer_min: -5\ninteger_max: 5").unwrap();

        let config = CastConfig::from_file(file.path()).unwrap();
        assert_eq!(config, CastConfig { integer_min: -5, integer_max: 5 });
    }

    #[test]
    fn test_missing_file() {
        let err = CastConfig::from_file("/nonexistent/cast.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
