//! Pinning of persisted identifier mapping entries.

use crate::mapping::IdentifierMap;

use super::buckets::TypeBuckets;

/// Whether a persisted entry still holds against the current remote
/// snapshot. Consumed internally; a stale entry is recoverable via
/// rematching and never surfaces as an error.
#[derive(Debug, PartialEq, Eq)]
enum PinOutcome {
    Pinned,
    Stale,
}

/// Pin every persisted entry whose uuid still names a live registration of
/// the local extension's type. Pinned pairs are removed from their bucket
/// so later phases never reconsider them; stale entries are dropped.
pub(crate) fn apply_persisted(
    persisted: &IdentifierMap,
    buckets: &mut TypeBuckets,
) -> Vec<(String, String)> {
    let mut pinned = Vec::new();
    for (local_identifier, uuid) in persisted {
        match pin_entry(local_identifier, uuid, buckets) {
            PinOutcome::Pinned => pinned.push((local_identifier.clone(), uuid.clone())),
            PinOutcome::Stale => {
                tracing::debug!(local_identifier, uuid, "discarding stale identifier entry");
            }
        }
    }
    pinned
}

fn pin_entry(local_identifier: &str, uuid: &str, buckets: &mut TypeBuckets) -> PinOutcome {
    // The entry may reference an extension no longer present locally.
    let Some(extension_type) = buckets.local_type(local_identifier) else {
        return PinOutcome::Stale;
    };
    // Unknown uuid, or uuid now registered under a different type.
    if buckets.take_remote(&extension_type, uuid).is_none() {
        return PinOutcome::Stale;
    }
    buckets.take_local(local_identifier);
    PinOutcome::Pinned
}
