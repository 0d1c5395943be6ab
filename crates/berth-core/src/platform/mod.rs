//! Platform collaborator layer.
//!
//! The reconciliation engine talks to the deployment platform through the
//! [`PlatformClient`] trait: one call to snapshot an app's registered
//! extensions and one call to register a new one. [`HttpPlatformClient`] is
//! the production implementation; tests substitute their own.

pub mod http;

use serde::{Deserialize, Serialize};

pub use http::HttpPlatformClient;

/// The platform's record of a deployed extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRegistration {
    /// Durable remote identity; stable for the lifetime of the registration.
    pub uuid: String,

    /// Platform-internal id of the registration.
    pub id: String,

    /// Title the extension was registered under.
    pub title: String,

    /// Platform extension type.
    #[serde(rename = "type")]
    pub extension_type: String,
}

/// Remote operations a reconciliation run suspends on.
///
/// `fetch_registrations` must return the complete current set in one call;
/// no pagination is assumed. `create_registration` is the only operation
/// that mutates remote state, and the engine calls it at most once per
/// unmatched local extension per run.
#[allow(async_fn_in_trait)]
pub trait PlatformClient {
    async fn fetch_registrations(&self, app_id: &str) -> anyhow::Result<Vec<RemoteRegistration>>;

    async fn create_registration(
        &self,
        app_id: &str,
        extension_type: &str,
        title: &str,
    ) -> anyhow::Result<RemoteRegistration>;
}
