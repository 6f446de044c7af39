//! Login, registration and token persistence.

use serde::Serialize;

use super::client::ApiClient;
use crate::error::{ApiError, Result, StoreError};
use crate::storage::KvStore;
use crate::validation::require;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "jwtToken";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// POST `/login`, persist the returned token and attach it to `client`.
pub async fn login(
    client: &mut ApiClient,
    store: &dyn KvStore,
    username: &str,
    password: &str,
) -> Result<String> {
    require("username", username)?;
    require("password", password)?;

    let response = client
        .post_public("/login", &Credentials { username, password })
        .await?;
    let token = response
        .get("access_token")
        .and_then(|t| t.as_str())
        .ok_or(ApiError::MissingToken)?
        .to_string();

    store.set(TOKEN_KEY, &token)?;
    client.set_token(Some(token.clone()));
    tracing::info!(username, "logged in");
    Ok(token)
}

/// POST `/register`. Does not log the user in.
pub async fn register(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<serde_json::Value> {
    require("username", username)?;
    require("password", password)?;

    let response = client
        .post_public("/register", &Credentials { username, password })
        .await?;
    Ok(response)
}

/// Forget the token locally. The server is not contacted.
pub fn logout(client: &mut ApiClient, store: &dyn KvStore) -> Result<(), StoreError> {
    store.remove(TOKEN_KEY)?;
    client.set_token(None);
    Ok(())
}

/// Token persisted by a previous [`login`], if any.
pub fn stored_token(store: &dyn KvStore) -> Result<Option<String>, StoreError> {
    store.get(TOKEN_KEY)
}
