//! Per-type matching decisions.

use std::collections::HashSet;

use super::buckets::TypeBuckets;

/// Outcome of the matching pass over all buckets left after pinning.
#[derive(Debug, Default)]
pub(crate) struct MatchPlan {
    /// Pairs whose type had exactly one candidate on each side.
    pub matched: Vec<(String, String)>,

    /// Local identifiers with no remote candidate of their type; they need
    /// registrations created.
    pub to_create: HashSet<String>,

    /// Types with remote registrations but no local extension.
    pub stray_types: Vec<String>,

    /// Types with several unmatched candidates on at least one side.
    pub ambiguous_types: Vec<String>,
}

/// Decide every bucket.
///
/// A single candidate per side is the only auto-match case: with more than
/// one candidate the pairing order would be arbitrary, and a silently wrong
/// pairing would corrupt deployment state. Stray and ambiguous buckets are
/// recorded rather than raised, so the remaining buckets still get
/// processed (and created) before the failure surfaces.
pub(crate) fn plan_matches(buckets: &TypeBuckets) -> MatchPlan {
    let mut plan = MatchPlan::default();
    for (extension_type, bucket) in buckets.iter() {
        match (bucket.local.len(), bucket.remote.len()) {
            // Bucket fully consumed by pinning.
            (0, 0) => {}
            (0, _) => plan.stray_types.push(extension_type.clone()),
            (_, 0) => plan
                .to_create
                .extend(bucket.local.iter().map(|e| e.local_identifier.clone())),
            (1, 1) => plan.matched.push((
                bucket.local[0].local_identifier.clone(),
                bucket.remote[0].uuid.clone(),
            )),
            _ => plan.ambiguous_types.push(extension_type.clone()),
        }
    }
    plan
}
