//! Formulation policy.
//!
//! Capacity bounds, the ingredient limit and default labels are one value handed to the
//! engine at construction. Every field has a default, so a YAML file only needs the
//! keys it changes:
//!
//! ```yaml
//! max_capacity: 2000
//! max_ingredients: 12
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulationConfig {
    /// Smallest accepted container (ml).
    pub min_capacity: f64,
    /// Largest accepted container (ml).
    pub max_capacity: f64,
    /// Container size of a fresh engine (ml).
    pub default_capacity: f64,
    pub max_ingredients: usize,
    pub default_ingredient_name: String,
    pub default_mixture_name: String,
}

impl Default for FormulationConfig {
    fn default() -> Self {
        Self {
            min_capacity: 10.0,
            max_capacity: 10_000.0,
            default_capacity: 100.0,
            max_ingredients: 32,
            default_ingredient_name: "Unnamed Ingredient".to_string(),
            default_mixture_name: "Unsaved Mixture".to_string(),
        }
    }
}

impl FormulationConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_capacity.is_finite() || self.min_capacity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_capacity",
                value: self.min_capacity.to_string(),
                reason: "must be positive and finite",
            });
        }
        if !self.max_capacity.is_finite() || self.max_capacity < self.min_capacity {
            return Err(ConfigError::InvalidValue {
                field: "max_capacity",
                value: self.max_capacity.to_string(),
                reason: "must be finite and not below min_capacity",
            });
        }
        if !self.capacity_in_policy(self.default_capacity) {
            return Err(ConfigError::InvalidValue {
                field: "default_capacity",
                value: self.default_capacity.to_string(),
                reason: "must lie within min_capacity..=max_capacity",
            });
        }
        if self.max_ingredients == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_ingredients",
                value: "0".to_string(),
                reason: "must allow at least one ingredient",
            });
        }
        Ok(())
    }

    pub fn capacity_in_policy(&self, capacity: f64) -> bool {
        capacity.is_finite() && capacity >= self.min_capacity && capacity <= self.max_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FormulationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.min_capacity, 10.0);
        assert_eq!(config.max_capacity, 10_000.0);
        assert_eq!(config.default_capacity, 100.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = FormulationConfig::from_yaml_str("max_ingredients: 4\n").unwrap();
        assert_eq!(config.max_ingredients, 4);
        assert_eq!(config.default_ingredient_name, "Unnamed Ingredient");
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = FormulationConfig::from_yaml_str("min_capacity: 500\nmax_capacity: 100\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_capacity",
                ..
            }
        ));
    }

    #[test]
    fn default_capacity_outside_policy_rejected() {
        let config = FormulationConfig {
            default_capacity: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "default_capacity",
                ..
            })
        ));
    }

    #[test]
    fn zero_ingredient_limit_rejected() {
        assert!(FormulationConfig::from_yaml_str("max_ingredients: 0\n").is_err());
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = FormulationConfig::from_yaml_str("max_ingredients: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join("fd_engine_config_load.yaml");
        std::fs::write(&path, "default_capacity: 30\nmin_capacity: 30\n").unwrap();
        let config = FormulationConfig::load_yaml(&path).unwrap();
        assert_eq!(config.default_capacity, 30.0);
        let _ = std::fs::remove_file(&path);
    }
}
