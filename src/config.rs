//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Department sort field
    pub department_sort_field: Option<String>,
    /// Department sort direction
    pub department_sort_direction: Option<String>,
    /// Seller sort field
    pub seller_sort_field: Option<String>,
    /// Seller sort direction
    pub seller_sort_direction: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "salesdesk", "salesdesk")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.department_sort_field.is_none());
        assert!(config.department_sort_direction.is_none());
        assert!(config.seller_sort_field.is_none());
        assert!(config.seller_sort_direction.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = TuiConfig {
            department_sort_field: Some("name".to_string()),
            department_sort_direction: Some("asc".to_string()),
            seller_sort_field: Some("salary".to_string()),
            seller_sort_direction: Some("desc".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.department_sort_field, Some("name".to_string()));
        assert_eq!(parsed.department_sort_direction, Some("asc".to_string()));
        assert_eq!(parsed.seller_sort_field, Some("salary".to_string()));
        assert_eq!(parsed.seller_sort_direction, Some("desc".to_string()));
    }

    #[test]
    fn test_partial_serialization() {
        let config = TuiConfig {
            seller_sort_field: Some("email".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.seller_sort_field, Some("email".to_string()));
        assert!(parsed.department_sort_field.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let json = "{}";
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.seller_sort_field.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"seller_sort_field": "name", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.seller_sort_field, Some("name".to_string()));
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
