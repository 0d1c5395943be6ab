//! Local extension model.

use serde::{Deserialize, Serialize};

/// A deployable extension defined in the local project checkout.
///
/// Immutable for the duration of a reconciliation run; the identifier is
/// unique within the project and stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalExtension {
    /// Identifier unique within the project, e.g. the extension directory name.
    pub local_identifier: String,

    /// Platform extension type, e.g. `checkout_post_purchase`.
    #[serde(rename = "type")]
    pub extension_type: String,

    /// Human-readable name forwarded to the platform when the extension is
    /// registered for the first time.
    pub title: String,
}

impl LocalExtension {
    pub fn new(
        local_identifier: impl Into<String>,
        extension_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            extension_type: extension_type.into(),
            title: title.into(),
        }
    }
}
