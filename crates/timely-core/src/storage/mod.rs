mod config;
pub mod kv;

pub use config::{ApiConfig, Config, NotificationsConfig, StorageConfig, UiConfig};
pub use kv::{FileKvStore, KeyringKvStore, KvStore, MemoryKvStore};

use std::path::PathBuf;

/// Returns `~/.config/timely-tales[-dev]/` based on TIMELY_ENV.
///
/// Set TIMELY_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMELY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timely-tales-dev")
    } else {
        base_dir.join("timely-tales")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
