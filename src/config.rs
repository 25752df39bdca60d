use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defs::DEFAULT_COLOR;
use crate::logging::{log_info, log_warning};

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardConfig {
    pub color: String,
    pub seed: Option<i32>,
    pub log_file: Option<PathBuf>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            seed: None,
            log_file: None,
        }
    }
}

impl CardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_str_content(&content))
    }

    fn from_str_content(content: &str) -> Self {
        let config_map = parse_config(content);

        let color = config_map.get("color")
            .cloned()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        let seed = config_map.get("seed")
            .and_then(|s| s.parse::<i32>().ok());

        let log_file = config_map.get("log_file")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        CardConfig { color, seed, log_file }
    }

    pub fn load_or_default() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(config_path: P) -> Self {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Self::default();
        }

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load config from {}: {}. Using defaults.",
                    config_path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}

fn parse_config(content: &str) -> HashMap<String, String> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse key = value pairs
        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let content = r#"
            # This is a comment
            color = #aaffaa
            seed = -17
            # Another comment
            log_file = bingo.log
        "#;

        let config = parse_config(content);
        assert_eq!(config.get("color"), Some(&"#aaffaa".to_string()));
        assert_eq!(config.get("seed"), Some(&"-17".to_string()));
        assert_eq!(config.get("log_file"), Some(&"bingo.log".to_string()));
    }

    #[test]
    fn test_config_values() {
        let config = CardConfig::from_str_content("color = #123456\nseed = 99\n");
        assert_eq!(config.color, "#123456");
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_bad_seed_is_dropped() {
        let config = CardConfig::from_str_content("seed = twelve\n");
        assert_eq!(config.seed, None);
        assert_eq!(config.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_card_config_default() {
        let config = CardConfig::default();
        assert_eq!(config.color, "#ffaaaa");
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("bingo_card_missing_config.conf");
        let _ = fs::remove_file(&path);
        assert_eq!(CardConfig::load_from(&path), CardConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("bingo_card_test_config.conf");
        fs::write(&path, "color = #0000ff\n").unwrap();
        let config = CardConfig::load_from(&path);
        assert_eq!(config.color, "#0000ff");
        let _ = fs::remove_file(&path);
    }
}
