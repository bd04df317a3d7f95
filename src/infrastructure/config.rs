use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::DevTermConfig;
use crate::domain::error::{DevTermError, DevTermResult};

/// Configuration manager
///
/// Resolves a global config at `~/.config/devterm/config.toml` and an
/// optional project-local `.devterm/config.toml` found by walking up
/// from the current directory. Project settings win over global ones.
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> DevTermResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration, starting from defaults and layering global
    /// then project files on top.
    pub fn load_config(&self) -> DevTermResult<DevTermConfig> {
        let mut config = DevTermConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config = self.load_config_from_path(project_path)?;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file, or fall back to that
    /// file being explicitly named on the command line.
    pub fn load_config_from_path(&self, path: &Path) -> DevTermResult<DevTermConfig> {
        let content = fs::read_to_string(path).map_err(|e| DevTermError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| DevTermError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    fn get_global_config_path() -> DevTermResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| DevTermError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("devterm").join("config.toml"))
    }

    /// Find project configuration by walking up the directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".devterm").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_manager_creation() {
        let _manager = ConfigManager::new().unwrap();
    }

    #[test]
    fn test_load_config_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[server]\nurl = \"http://relay.local:8080\"\n\n[global]\npoll_interval_ms = 500\n",
        )
        .unwrap();

        let manager = ConfigManager::new().unwrap();
        let config = manager.load_config_from_path(&config_file).unwrap();

        assert_eq!(config.server.url, "http://relay.local:8080");
        assert_eq!(config.global.poll_interval_ms, 500);
        // Unspecified fields keep their defaults
        assert_eq!(config.global.transcript_capacity, 10_000);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "not valid toml [[[").unwrap();

        let manager = ConfigManager::new().unwrap();
        let err = manager.load_config_from_path(&config_file).unwrap_err();
        assert!(matches!(err, DevTermError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let manager = ConfigManager::new().unwrap();
        let err = manager
            .load_config_from_path(Path::new("/nonexistent/devterm.toml"))
            .unwrap_err();
        assert!(matches!(err, DevTermError::Config { .. }));
    }
}
