//! Runtime configuration and logging setup.

use std::path::PathBuf;

/// Where saves live and which slot a session writes to.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub save_dir: PathBuf,
    pub slot: String,
}

impl SessionConfig {
    pub fn new(save_dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        Self {
            save_dir: save_dir.into(),
            slot: slot.into(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            slot: "save".to_string(),
        }
    }
}

/// Platform-specific save directory, with a local fallback when the
/// platform reports no home.
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wayfarer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Installs a global fmt subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_names_a_slot() {
        let config = SessionConfig::default();
        assert_eq!(config.slot, "save");
        assert!(!config.save_dir.as_os_str().is_empty());
    }
}
