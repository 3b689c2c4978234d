use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::keymap::Action;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title shown on the input border.
    pub title: String,
    /// Start in overwrite mode.
    pub overwrite: bool,
    /// Extra key bindings layered over the defaults, e.g. `ctrl+k: clear`.
    pub keybindings: BTreeMap<String, Action>,
    pub log_dir: Option<PathBuf>,
    /// File this config was read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Input".to_string(),
            overwrite: false,
            keybindings: BTreeMap::new(),
            log_dir: None,
            source: None,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let mut config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.source = Some(path);
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os("TUIAREA_CONFIG") {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tuiarea")
                .join("config.yaml")
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tuiarea")
        })
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.title, "Input");
        assert!(!config.overwrite);
        assert!(config.keybindings.is_empty());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn config_loads_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml = r#"
title: "Message"
overwrite: true
keybindings:
  ctrl+k: delete_to_start_of_line
  f2: toggle_overwrite
log_dir: "/tmp/tuiarea-logs"
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.title, "Message");
        assert!(config.overwrite);
        assert_eq!(
            config.keybindings.get("ctrl+k"),
            Some(&Action::DeleteToStartOfLine)
        );
        assert_eq!(config.keybindings.get("f2"), Some(&Action::ToggleOverwrite));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/tuiarea-logs"));
        assert_eq!(config.source, Some(config_path));
    }

    #[test]
    fn config_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "overwrite: true\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.overwrite);
        assert_eq!(config.title, "Input");
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn config_load_returns_default_when_file_missing() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/config.yaml"))).unwrap();
        assert_eq!(config.title, "Input");
        assert!(!config.overwrite);
        assert!(config.source.is_none());
    }

    #[test]
    fn config_load_rejects_unknown_action() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "keybindings:\n  ctrl+k: explode\n").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(
            err.to_string().contains("Failed to parse config file"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn config_with_overwrite_sets_flag() {
        let config = Config::default().with_overwrite(true);
        assert!(config.overwrite);
    }

    #[test]
    fn config_default_log_dir_ends_with_app_name() {
        let config = Config::default();
        assert!(config.log_dir().ends_with("tuiarea"));
    }

    #[test]
    fn config_serializes_to_yaml() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("ctrl+k".to_string(), Action::Clear);
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.contains("title: Input"));
        assert!(yaml.contains("overwrite: false"));
        assert!(yaml.contains("ctrl+k: clear"));
        assert!(!yaml.contains("source"));
    }
}
