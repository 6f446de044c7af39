//! First-launch detection for the onboarding screens.

use crate::error::StoreError;
use crate::storage::KvStore;

/// Store key set once onboarding has been shown.
pub const LAUNCHED_KEY: &str = "alreadyLaunched";

/// `true` exactly once per store: the first call records the launch.
pub fn is_first_launch(store: &dyn KvStore) -> Result<bool, StoreError> {
    if store.get(LAUNCHED_KEY)?.is_some() {
        return Ok(false);
    }
    store.set(LAUNCHED_KEY, "true")?;
    tracing::debug!("first launch recorded");
    Ok(true)
}
