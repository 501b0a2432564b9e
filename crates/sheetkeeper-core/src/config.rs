//! Immutable sheet configuration.
//!
//! Built once at startup (defaults or a TOML file) and passed by reference to
//! every component.

use serde::{Deserialize, Serialize};
use sheetkeeper_engine::engine::{ColumnRoles, FadeConfig, Implication, Role, consistency_rules};

use crate::error::{Result, SheetError};

fn default_number_of_columns() -> usize {
    9
}

fn default_completed_status() -> String {
    "Completed".to_string()
}

fn default_priority() -> String {
    "0".to_string()
}

fn default_max_rows() -> usize {
    1000
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    /// Columns holding data; lookups beyond this are out of bounds.
    #[serde(default = "default_number_of_columns")]
    pub number_of_columns: usize,
    #[serde(default)]
    pub columns: ColumnRoles,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default = "default_completed_status")]
    pub completed_status: String,
    #[serde(default = "default_priority")]
    pub default_priority: String,
    /// Maximum row count for documents created by this process.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            number_of_columns: default_number_of_columns(),
            columns: ColumnRoles::default(),
            fade: FadeConfig::default(),
            completed_status: default_completed_status(),
            default_priority: default_priority(),
            max_rows: default_max_rows(),
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<()> {
        for role in Role::ALL {
            let col = self.columns.column(role);
            if col == 0 || col > self.number_of_columns {
                return Err(SheetError::Config(format!(
                    "{} column {} is outside 1..={}",
                    role, col, self.number_of_columns
                )));
            }
        }
        if let Some((a, b)) = self.columns.duplicate() {
            return Err(SheetError::Config(format!(
                "{} and {} columns must differ",
                a, b
            )));
        }
        if !self.fade.rate.is_finite() || self.fade.rate <= 0.0 {
            return Err(SheetError::Config(format!(
                "fade rate must be a positive number, got {}",
                self.fade.rate
            )));
        }
        for (key, value) in [
            ("completed_status", &self.completed_status),
            ("default_priority", &self.default_priority),
        ] {
            if value.trim().is_empty() {
                return Err(SheetError::Config(format!("{} must not be blank", key)));
            }
        }
        if self.max_rows < 2 {
            return Err(SheetError::Config(
                "max_rows must leave room for a data row below the header".to_string(),
            ));
        }
        Ok(())
    }

    /// The STATUS/PRIORITY implications in this configuration's vocabulary.
    pub fn rules(&self) -> [Implication; 2] {
        consistency_rules(&self.completed_status, &self.default_priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkeeper_engine::engine::{ClampCeiling, Rgb};

    #[test]
    fn test_defaults_are_valid() {
        let config = SheetConfig::default();
        config.validate().unwrap();
        assert_eq!(config.columns.date, 9);
        assert_eq!(config.columns.priority, 7);
        assert_eq!(config.columns.status, 3);
        assert_eq!(config.fade.rate, 0.15);
        assert_eq!(config.fade.start, Rgb::WHITE);
        assert_eq!(config.fade.target, Rgb::BLACK);
    }

    #[test]
    fn test_rejects_column_beyond_width() {
        let mut config = SheetConfig::default();
        config.number_of_columns = 8;
        assert!(matches!(config.validate(), Err(SheetError::Config(_))));
    }

    #[test]
    fn test_rejects_shared_columns() {
        let mut config = SheetConfig::default();
        config.columns.priority = config.columns.status;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("priority and status"));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let mut config = SheetConfig::default();
        config.fade.rate = 0.0;
        assert!(config.validate().is_err());
        config.fade.rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_rule_values() {
        let mut config = SheetConfig::default();
        config.default_priority = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_priority"));

        let mut config = SheetConfig::default();
        config.completed_status = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("completed_status"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SheetConfig = toml::from_str(
            r##"
completed_status = "Done"

[columns]
status = 2

[fade]
rate = 0.3
ceiling = "start"
start = "#FFFF00"
"##,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.completed_status, "Done");
        assert_eq!(config.columns.status, 2);
        assert_eq!(config.columns.date, 9);
        assert_eq!(config.fade.ceiling, ClampCeiling::Start);
        assert_eq!(config.fade.start, Rgb::new(255, 255, 0));
        assert_eq!(config.fade.target, Rgb::BLACK);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<SheetConfig>("colour = 1").is_err());
    }
}
