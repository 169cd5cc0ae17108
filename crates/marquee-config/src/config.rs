use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Trending window: "day" or "week"
    #[serde(default = "default_trending_window")]
    pub trending_window: String,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_trending_window() -> String {
    "week".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            trending_window: default_trending_window(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Missing config file yields defaults; the API key may still come from
    /// the environment.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("MARQUEE_TMDB_API_KEY") {
            if !key.is_empty() {
                self.tmdb.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.api_key.is_empty() || self.tmdb.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!(
                "TMDB API key is not configured. Set it in config.toml or via MARQUEE_TMDB_API_KEY"
            ));
        }
        if self.tmdb.trending_window != "day" && self.tmdb.trending_window != "week" {
            return Err(anyhow::anyhow!(
                "Invalid trending_window: {} (expected \"day\" or \"week\")",
                self.tmdb.trending_window
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            tmdb: TmdbConfig {
                api_key: "abc123".to_string(),
                ..TmdbConfig::default()
            },
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.api_key, "abc123");
        assert_eq!(loaded.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(loaded.tmdb.trending_window, "week");
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str("[tmdb]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org/t/p");
    }

    #[test]
    fn test_validate_rejects_placeholder_key() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        config.tmdb.api_key = "real-key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_trending_window() {
        let mut config = Config::default();
        config.tmdb.api_key = "k".to_string();
        config.tmdb.trending_window = "month".to_string();
        assert!(config.validate().is_err());
    }
}
