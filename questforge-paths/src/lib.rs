//! Where QuestForge keeps its files.
//!
//! Follows the XDG base directory layout on every platform so the CLI finds
//! the same session file on Linux and macOS.

use std::path::PathBuf;

const APP_DIR: &str = "questforge";

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    match std::env::var_os(env_var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR),
        _ => dirs::home_dir()
            .unwrap_or_default()
            .join(home_relative)
            .join(APP_DIR),
    }
}

/// `$XDG_DATA_HOME/questforge`, or `~/.local/share/questforge`.
///
/// ```
/// let data = questforge_paths::data_dir();
/// assert!(data.ends_with("questforge"));
/// ```
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// Default directory for the persisted session
pub fn session_dir() -> PathBuf {
    data_dir().join("session")
}
