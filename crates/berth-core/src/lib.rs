//! Berth Core Library
//!
//! Provides the domain logic for reconciling locally-defined app extensions
//! against their registrations on the deployment platform: a stable
//! local-identifier-to-uuid mapping, automatic matching by extension type,
//! and registration creation for extensions that have none.

pub mod extension;
pub mod mapping;
pub mod platform;
pub mod reconcile;

/// Re-exports of commonly used types
pub mod prelude {
    // Extension model
    pub use crate::extension::LocalExtension;

    // Persisted identifier mapping
    pub use crate::mapping::{IdentifierMap, IdentifierStore};

    // Platform collaborators
    pub use crate::platform::{HttpPlatformClient, PlatformClient, RemoteRegistration};

    // Reconciliation
    pub use crate::reconcile::{
        ReconcileError, ReconcileRequest, ReconciliationResult, reconcile,
    };
}
