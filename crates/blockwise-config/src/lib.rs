use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_extension() -> String {
    "magik".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root of the source tree to browse.
    pub source_path: PathBuf,
    /// Extension of source files under the root.
    #[serde(default = "default_extension")]
    pub file_extension: String,
    /// Runtime executable for sessions, when one is installed.
    #[serde(default)]
    pub runtime_program: Option<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded source path
        config.source_path = Self::expand_path(&config.source_path).unwrap_or(config.source_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockwise");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn minimal_config() -> Config {
        Config {
            source_path: PathBuf::from("/tmp/test-sources"),
            file_extension: default_extension(),
            runtime_program: None,
        }
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/blockwise/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            source_path: PathBuf::from("/tmp/test-sources"),
            file_extension: "magik".to_string(),
            runtime_program: Some("gis".to_string()),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.source_path, deserialized.source_path);
        assert_eq!(original.file_extension, deserialized.file_extension);
        assert_eq!(original.runtime_program, deserialized.runtime_program);
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let config: Config = toml::from_str("source_path = \"/srv/code\"\n").unwrap();
        assert_eq!(config.file_extension, "magik");
        assert_eq!(config.runtime_program, None);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("BLOCKWISE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$BLOCKWISE_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("BLOCKWISE_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent = temp_dir.path().join("nonexistent.toml");
        assert!(Config::load_from_path(&non_existent).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let test_config = minimal_config();

        test_config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded.source_path, test_config.source_path);
        assert_eq!(loaded.file_extension, test_config.file_extension);
    }

    #[test]
    fn test_config_with_tilde_in_toml() {
        let config_content = "source_path = \"~/test/sources\"\n";

        let mut config: Config = toml::from_str(config_content).unwrap();
        config.source_path = Config::expand_path(&config.source_path).unwrap();

        let expanded = config.source_path.to_string_lossy();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.contains("test/sources"));
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "source_path = [not toml").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }
}
