use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use super::types::{
    ApiConfig, QuestforgeConfig, RawApiConfig, RawQuestforgeConfig, RawSessionConfig,
    SessionConfig,
};

/// Name of the directory holding project-local config
const PROJECT_CONFIG_DIR: &str = ".questforge";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user, then project)
    pub fn load() -> Result<QuestforgeConfig> {
        let mut raw = RawQuestforgeConfig::default();

        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "questforge").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Project config path, overridable with `QUESTFORGE_PROJECT_CONFIG_DIR`
    pub fn project_config_path() -> PathBuf {
        match std::env::var("QUESTFORGE_PROJECT_CONFIG_DIR") {
            Ok(dir) => PathBuf::from(dir).join("config.toml"),
            Err(_) => PathBuf::from(PROJECT_CONFIG_DIR).join("config.toml"),
        }
    }

    fn read_raw(path: &Path) -> Result<RawQuestforgeConfig> {
        debug!(path = %path.display(), "reading config layer");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Overlay values win only where they are set
    fn merge_raw(base: RawQuestforgeConfig, overlay: RawQuestforgeConfig) -> RawQuestforgeConfig {
        RawQuestforgeConfig {
            api: RawApiConfig {
                base_url: overlay.api.base_url.or(base.api.base_url),
            },
            session: RawSessionConfig {
                store_dir: overlay.session.store_dir.or(base.session.store_dir),
                default_role: overlay.session.default_role.or(base.session.default_role),
            },
        }
    }

    fn finalize(raw: RawQuestforgeConfig) -> QuestforgeConfig {
        let api = ApiConfig::default();
        let session = SessionConfig::default();
        QuestforgeConfig {
            api: ApiConfig {
                base_url: raw.api.base_url.unwrap_or(api.base_url),
            },
            session: SessionConfig {
                store_dir: raw.session.store_dir.unwrap_or(session.store_dir),
                default_role: raw.session.default_role,
            },
        }
    }

    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<QuestforgeConfig> {
        if path.exists() {
            Ok(Self::finalize(Self::read_raw(path)?))
        } else {
            Ok(QuestforgeConfig::default())
        }
    }
}
