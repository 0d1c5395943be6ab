//! Extension identifier reconciliation.
//!
//! Maps every locally-defined extension to the uuid of its remote
//! registration, creating registrations for extensions that have none. A
//! run is phased: group both sides by extension type, pin entries from the
//! persisted mapping, auto-match buckets with exactly one candidate per
//! side, create registrations for the rest, then assemble. The run fails
//! as a whole if any bucket was ambiguous or held remote registrations
//! with no local counterpart; no partial mapping is ever returned.

mod buckets;
mod engine;
mod error;
mod matcher;
mod pinning;

pub use engine::{ReconcileRequest, reconcile};
pub use error::ReconcileError;

use crate::mapping::IdentifierMap;

/// Successful outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub app_id: String,

    /// Local identifier → remote uuid; exactly one entry per local
    /// extension, and no uuid is assigned to two identifiers.
    pub extensions: IdentifierMap,
}
