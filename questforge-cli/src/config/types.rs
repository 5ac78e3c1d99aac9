use std::path::PathBuf;

use questforge_core::Role;
use serde::{Deserialize, Serialize};

/// Backend the admin client talks to
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration as stored in TOML files, every field optional so layers merge
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQuestforgeConfig {
    #[serde(default)]
    pub api: RawApiConfig,

    #[serde(default)]
    pub session: RawSessionConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSessionConfig {
    pub store_dir: Option<PathBuf>,
    pub default_role: Option<Role>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestforgeConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding `session.json`
    pub store_dir: PathBuf,

    /// Role to enter on login when the user holds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<Role>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_dir: questforge_paths::session_dir(),
            default_role: None,
        }
    }
}
