//! Explicit application state.
//!
//! Everything a component needs beyond its own inputs (configuration, the
//! authenticated client, local storage, notifications) lives here and is
//! passed in. Nothing is global.

use crate::api::{self, ApiClient};
use crate::classes::ClassReminderScheduler;
use crate::error::{Result, StoreError};
use crate::notify::{LogNotifier, MutedNotifier, Notifier};
use crate::storage::{Config, FileKvStore, KeyringKvStore, KvStore};
use crate::task::DueStateClassifier;

pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    /// Local values: first-launch flag, and the token unless it lives in
    /// `token_store`.
    pub store: Box<dyn KvStore>,
    pub token_store: Box<dyn KvStore>,
    pub notifier: Box<dyn Notifier>,
}

impl AppContext {
    /// Build a context and restore any token saved by an earlier login.
    pub fn new(
        config: Config,
        store: Box<dyn KvStore>,
        token_store: Box<dyn KvStore>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        // An unreadable token store (no keyring daemon, say) means logged out.
        let token = api::auth::stored_token(token_store.as_ref()).unwrap_or_else(|e| {
            tracing::warn!("could not read stored token: {e}");
            None
        });
        let client = ApiClient::from_config(&config.api)?.with_token(token);
        Ok(Self {
            config,
            client,
            store,
            token_store,
            notifier,
        })
    }

    /// Context backed by the user's config file and data directory.
    pub fn open_default() -> Result<Self> {
        let config = Config::load_or_default();
        let store: Box<dyn KvStore> = Box::new(FileKvStore::open_default()?);
        let token_store: Box<dyn KvStore> = if config.storage.token_in_keyring {
            Box::new(KeyringKvStore::new())
        } else {
            Box::new(FileKvStore::open_default()?)
        };
        let notifier: Box<dyn Notifier> = if config.notifications.enabled {
            Box::new(LogNotifier)
        } else {
            Box::new(MutedNotifier)
        };
        Self::new(config, store, token_store, notifier)
    }

    /// Point the client at another server for this run. The config file is
    /// not touched.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.config.api.base_url = base_url.to_string();
        let token = self.client.token().map(str::to_string);
        self.client = ApiClient::from_config(&self.config.api)?.with_token(token);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.token().is_some()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        api::auth::login(&mut self.client, self.token_store.as_ref(), username, password).await
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        api::auth::logout(&mut self.client, self.token_store.as_ref())
    }

    pub fn is_first_launch(&self) -> Result<bool, StoreError> {
        crate::onboarding::is_first_launch(self.store.as_ref())
    }

    pub fn class_reminders(&self) -> ClassReminderScheduler {
        ClassReminderScheduler::from_config(&self.config.notifications)
    }

    pub fn due_classifier(&self) -> DueStateClassifier {
        DueStateClassifier::from_config(&self.config.notifications)
    }
}
