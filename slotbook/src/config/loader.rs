//! Configuration file discovery and loading.
//!
//! Files are found in the data directory and by walking up from the
//! working directory. Each carries a precedence used by the merger.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Project files and their precedence, lowest first.
const PROJECT_FILES: [(&str, u8); 2] = [("slotbook.yaml", 2), ("slotbook.local.yaml", 3)];

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files, lowest precedence first.
    ///
    /// Looks for `<data_dir>/config.yaml` (precedence 1), then the nearest
    /// directory at or above `working_dir` holding `slotbook.yaml` (2) or
    /// `slotbook.local.yaml` (3).
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources: Vec<ConfigSource> = Self::load_user_config(data_dir)?.into_iter().collect();
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::database::default_data_dir()?.join(USER_CONFIG_FILE),
        };
        if !path.exists() {
            return Ok(None);
        }
        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either project file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut current = start_dir.to_path_buf();
        loop {
            let mut found = Vec::new();
            for (name, precedence) in PROJECT_FILES {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    log::debug!("loaded configuration from {}", path.display());
                    found.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }
            if !found.is_empty() || !current.pop() {
                return Ok(found);
            }
        }
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;
        // a file of only comments is an empty config, not a parse error
        let has_content = contents
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with('#'));
        if !has_content {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        assert!(ConfigLoader::load_file(Path::new("/nonexistent/config.yaml")).is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "invalid: yaml: syntax:").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "maximum_lock_wait_seconds: 7\n").unwrap();
        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.maximum_lock_wait_seconds, Some(7));
    }

    #[test]
    fn test_load_comment_only_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "# nothing set\n\n#   business_hours:\n").unwrap();
        let config = ConfigLoader::load_file(&path).unwrap();
        assert!(config.maximum_lock_wait_seconds.is_none());
    }

    #[test]
    fn test_discover_no_configs() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigLoader::discover_project_configs(dir.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_discover_both_project_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("slotbook.yaml"), "maximum_lock_wait_seconds: 1\n").unwrap();
        fs::write(
            dir.path().join("slotbook.local.yaml"),
            "maximum_lock_wait_seconds: 2\n",
        )
        .unwrap();

        let configs = ConfigLoader::discover_project_configs(dir.path()).unwrap();
        assert_eq!(configs.len(), 2);
        let shared = configs.iter().find(|c| c.precedence == 2).unwrap();
        let local = configs.iter().find(|c| c.precedence == 3).unwrap();
        assert_eq!(shared.config.maximum_lock_wait_seconds, Some(1));
        assert_eq!(local.config.maximum_lock_wait_seconds, Some(2));
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let dir = TempDir::new().unwrap();
        let child = dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(dir.path().join("slotbook.yaml"), "output_format: json\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].path, dir.path().join("slotbook.yaml"));
    }

    #[test]
    fn test_load_all_includes_user_config() {
        let data = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        fs::write(data.path().join("config.yaml"), "output_format: csv\n").unwrap();
        fs::write(work.path().join("slotbook.yaml"), "output_format: json\n").unwrap();

        let sources = ConfigLoader::load_all(work.path(), Some(data.path())).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].precedence, 2);
    }
}
