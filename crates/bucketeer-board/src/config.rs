//! Configuration for a board
//!
//! Holds the auto-revert delay and the two classification rules.

use crate::BoardError;
use bucketeer_domain::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a [`Board`](crate::Board)
///
/// # Examples
///
/// ```
/// use bucketeer_board::BoardConfig;
///
/// // Default configuration: five second auto-revert
/// let config = BoardConfig::default();
/// assert_eq!(config.revert_delay_ms, 5000);
///
/// // Quick demo configuration
/// let config = BoardConfig::quick();
/// assert_eq!(config.revert_delay_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Time an item spends in a side column before it reverts (milliseconds)
    /// Default: 5000
    #[serde(default = "default_revert_delay_ms")]
    pub revert_delay_ms: u64,

    /// Item kind that goes to `GroupA` (exact, case-sensitive)
    /// Default: "Fruit"
    #[serde(default = "default_group_a_kind")]
    pub group_a_kind: String,

    /// Item kind that goes to `GroupB` (exact, case-sensitive)
    /// Default: "Vegetable"
    #[serde(default = "default_group_b_kind")]
    pub group_b_kind: String,

    /// Heading for the main column
    #[serde(default = "default_main_label")]
    pub main_label: String,

    /// Heading for the `GroupA` column
    #[serde(default = "default_group_a_label")]
    pub group_a_label: String,

    /// Heading for the `GroupB` column
    #[serde(default = "default_group_b_label")]
    pub group_b_label: String,
}

fn default_revert_delay_ms() -> u64 {
    5000
}

fn default_group_a_kind() -> String {
    "Fruit".to_string()
}

fn default_group_b_kind() -> String {
    "Vegetable".to_string()
}

fn default_main_label() -> String {
    "All Items".to_string()
}

fn default_group_a_label() -> String {
    "Fruits".to_string()
}

fn default_group_b_label() -> String {
    "Vegetables".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            revert_delay_ms: default_revert_delay_ms(),
            group_a_kind: default_group_a_kind(),
            group_b_kind: default_group_b_kind(),
            main_label: default_main_label(),
            group_a_label: default_group_a_label(),
            group_b_label: default_group_b_label(),
        }
    }
}

impl BoardConfig {
    /// One second auto-revert, handy for demos
    pub fn quick() -> Self {
        Self {
            revert_delay_ms: 1000,
            ..Self::default()
        }
    }

    /// Fifteen second auto-revert
    pub fn relaxed() -> Self {
        Self {
            revert_delay_ms: 15_000,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoardError> {
        let contents = std::fs::read_to_string(path)?;
        let config: BoardConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive a board
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.revert_delay_ms == 0 {
            return Err(BoardError::Config(
                "revert_delay_ms must be greater than zero".to_string(),
            ));
        }

        if self.group_a_kind.is_empty() || self.group_b_kind.is_empty() {
            return Err(BoardError::Config(
                "group kinds must not be empty".to_string(),
            ));
        }

        if self.group_a_kind == self.group_b_kind {
            return Err(BoardError::Config(format!(
                "group_a_kind and group_b_kind are both '{}'",
                self.group_a_kind
            )));
        }

        Ok(())
    }

    /// Get the auto-revert delay as Duration
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }

    /// Heading for a column
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::Main => &self.main_label,
            Category::GroupA => &self.group_a_label,
            Category::GroupB => &self.group_b_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.revert_delay_ms, 5000);
        assert_eq!(config.group_a_kind, "Fruit");
        assert_eq!(config.group_b_kind, "Vegetable");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(BoardConfig::quick().revert_delay_ms < BoardConfig::default().revert_delay_ms);
        assert!(BoardConfig::relaxed().revert_delay_ms > BoardConfig::default().revert_delay_ms);
    }

    #[test]
    fn test_duration_conversion() {
        let config = BoardConfig::default();
        assert_eq!(config.revert_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_labels() {
        let config = BoardConfig::default();
        assert_eq!(config.label(Category::Main), "All Items");
        assert_eq!(config.label(Category::GroupA), "Fruits");
        assert_eq!(config.label(Category::GroupB), "Vegetables");
    }

    #[test]
    fn test_validate_rejects_zero_delay() {
        let config = BoardConfig {
            revert_delay_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_kinds() {
        let config = BoardConfig {
            group_b_kind: "Fruit".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BoardConfig = toml::from_str("revert_delay_ms = 250").unwrap();
        assert_eq!(config.revert_delay_ms, 250);
        assert_eq!(config.group_a_kind, "Fruit");
        assert_eq!(config.main_label, "All Items");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "revert_delay_ms = 2000").unwrap();
        writeln!(file, "group_a_kind = \"Berry\"").unwrap();

        let config = BoardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.revert_delay_ms, 2000);
        assert_eq!(config.group_a_kind, "Berry");
        assert_eq!(config.group_b_kind, "Vegetable");
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "revert_delay_ms = 0").unwrap();

        assert!(BoardConfig::from_file(file.path()).is_err());
    }
}
