use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity family served by the REST API.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Path under the API base URL, e.g. `/tasks`.
    const PATH: &'static str;

    /// Identifier used in `PATH/{id}` routes.
    fn id(&self) -> &str;
}
