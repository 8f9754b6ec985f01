use crate::error::{Result, WidgetsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 500;
const DEFAULT_PAGE_OFFSET: i64 = 0;

/// Keys accepted by [`WidgetsConfig::get`] and [`WidgetsConfig::set`].
pub const CONFIG_KEYS: [&str; 3] = ["default-page-limit", "max-page-limit", "default-page-offset"];

/// Paging policy for the widget API, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetsConfig {
    /// Page size used when a listing asks for none (or a non-positive one)
    #[serde(default = "default_page_limit")]
    pub default_page_limit: i64,

    /// Upper bound on any requested page size
    #[serde(default = "max_page_limit")]
    pub max_page_limit: i64,

    /// Offset used when a listing asks for none (or a negative one)
    #[serde(default = "default_page_offset")]
    pub default_page_offset: i64,
}

fn default_page_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

fn max_page_limit() -> i64 {
    MAX_PAGE_LIMIT
}

fn default_page_offset() -> i64 {
    DEFAULT_PAGE_OFFSET
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
            default_page_offset: DEFAULT_PAGE_OFFSET,
        }
    }
}

impl WidgetsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: WidgetsConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-page-limit" => Some(self.default_page_limit.to_string()),
            "max-page-limit" => Some(self.max_page_limit.to_string()),
            "default-page-offset" => Some(self.default_page_offset.to_string()),
            _ => None,
        }
    }

    /// Set a value by key. The config is left unchanged if the result would be invalid.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| format!("{} expects an integer, got '{}'", key, value))?;

        let mut candidate = self.clone();
        match key {
            "default-page-limit" => candidate.default_page_limit = parsed,
            "max-page-limit" => candidate.max_page_limit = parsed,
            "default-page-offset" => candidate.default_page_offset = parsed,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        candidate.validate().map_err(|e| e.to_string())?;

        *self = candidate;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.max_page_limit < 1 {
            return Err(WidgetsError::InvalidArgument(
                "max-page-limit must be at least 1".to_string(),
            ));
        }
        if self.default_page_limit < 1 || self.default_page_limit > self.max_page_limit {
            return Err(WidgetsError::InvalidArgument(format!(
                "default-page-limit must be between 1 and {}",
                self.max_page_limit
            )));
        }
        if self.default_page_offset < 0 {
            return Err(WidgetsError::InvalidArgument(
                "default-page-offset must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetsConfig::default();
        assert_eq!(config.default_page_limit, 10);
        assert_eq!(config.max_page_limit, 500);
        assert_eq!(config.default_page_offset, 0);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = WidgetsConfig::default();
        assert_eq!(config.get("max-page-limit").as_deref(), Some("500"));
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_set_valid_value() {
        let mut config = WidgetsConfig::default();
        config.set("default-page-limit", "25").unwrap();
        assert_eq!(config.default_page_limit, 25);
    }

    #[test]
    fn test_set_rejects_inconsistent_limits() {
        let mut config = WidgetsConfig::default();
        assert!(config.set("default-page-limit", "600").is_err());
        assert!(config.set("max-page-limit", "5").is_err());
        assert!(config.set("default-page-offset", "-1").is_err());
        assert!(config.set("max-page-limit", "lots").is_err());
        assert!(config.set("nope", "1").is_err());
        assert_eq!(config, WidgetsConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = WidgetsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, WidgetsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested");

        let mut config = WidgetsConfig::default();
        config.set("max-page-limit", "50").unwrap();
        config.save(&dir).unwrap();

        let loaded = WidgetsConfig::load(&dir).unwrap();
        assert_eq!(loaded.max_page_limit, 50);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_page_limit": 20}"#,
        )
        .unwrap();

        let loaded = WidgetsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.default_page_limit, 20);
        assert_eq!(loaded.max_page_limit, 500);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_page_limit": 900}"#,
        )
        .unwrap();
        assert!(WidgetsConfig::load(temp_dir.path()).is_err());

        fs::write(temp_dir.path().join(CONFIG_FILENAME), "not json").unwrap();
        assert!(matches!(
            WidgetsConfig::load(temp_dir.path()),
            Err(WidgetsError::Serialization(_))
        ));
    }
}
