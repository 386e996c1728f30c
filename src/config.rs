use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Key under which the serialized state is stored.
pub(crate) const STORAGE_KEY: &str = "finguard-storage";

/// Overrides the platform data directory when set.
pub(crate) const DATA_DIR_ENV: &str = "FINGUARD_DATA_DIR";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_dir: PathBuf,
    pub(crate) storage_key: String,
}

impl Config {
    /// Resolves paths from the environment and creates the data directory.
    pub(crate) fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::ProjectDirs::from("com", "finguard", "FinGuard")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        let config = Self::with_data_dir(&data_dir);
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        Ok(config)
    }

    pub(crate) fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            db_path: data_dir.join("finguard.db"),
            log_dir: data_dir.join("logs"),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_data_dir() {
        let config = Config::with_data_dir(Path::new("/tmp/fg"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/fg/finguard.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/fg/logs"));
        assert_eq!(config.storage_key, "finguard-storage");
    }
}
