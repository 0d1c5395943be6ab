//! The reconciliation run.

use tracing::debug;

use crate::extension::LocalExtension;
use crate::mapping::IdentifierMap;
use crate::platform::PlatformClient;

use super::ReconciliationResult;
use super::buckets::TypeBuckets;
use super::error::ReconcileError;
use super::{matcher, pinning};

/// Inputs of one reconciliation run.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileRequest<'a> {
    pub app_id: &'a str,

    pub local_extensions: &'a [LocalExtension],

    /// Mapping recorded by an earlier run, if any. Stale entries are
    /// discarded silently, never fatal.
    pub persisted: Option<&'a IdentifierMap>,
}

/// Reconcile an app's local extensions against its remote registrations,
/// creating registrations for extensions that have none.
///
/// The remote snapshot is fetched once and never re-fetched within the
/// run. Creation calls are sequential, in local input order, and still
/// happen for resolvable buckets when another bucket turns out stray or
/// ambiguous; the fatal condition is only raised afterwards. Either every
/// local extension ends up mapped to a uuid or the run fails as a whole.
pub async fn reconcile<C: PlatformClient>(
    client: &C,
    request: ReconcileRequest<'_>,
) -> Result<ReconciliationResult, ReconcileError> {
    let remote = client.fetch_registrations(request.app_id).await?;
    debug!(
        app_id = request.app_id,
        local = request.local_extensions.len(),
        remote = remote.len(),
        "reconciling extension identifiers"
    );

    let mut buckets = TypeBuckets::build(request.local_extensions, &remote)?;

    let mut extensions = IdentifierMap::new();
    if let Some(persisted) = request.persisted {
        for (local_identifier, uuid) in pinning::apply_persisted(persisted, &mut buckets) {
            extensions.insert(local_identifier, uuid);
        }
    }

    let plan = matcher::plan_matches(&buckets);
    for (local_identifier, uuid) in plan.matched {
        extensions.insert(local_identifier, uuid);
    }

    for extension in request
        .local_extensions
        .iter()
        .filter(|e| plan.to_create.contains(&e.local_identifier))
    {
        let registration = client
            .create_registration(request.app_id, &extension.extension_type, &extension.title)
            .await?;
        debug!(
            local_identifier = extension.local_identifier.as_str(),
            uuid = registration.uuid.as_str(),
            "created extension registration"
        );
        extensions.insert(extension.local_identifier.clone(), registration.uuid);
    }

    // Stray remotes signal a more clearly invalid environment than
    // ambiguity, so they take priority when both occurred.
    if !plan.stray_types.is_empty() {
        return Err(ReconcileError::UnmatchedRemoteExtensions {
            extension_types: plan.stray_types,
        });
    }
    if !plan.ambiguous_types.is_empty() {
        return Err(ReconcileError::ManualMatchingRequired {
            extension_types: plan.ambiguous_types,
        });
    }

    Ok(ReconciliationResult {
        app_id: request.app_id.to_string(),
        extensions,
    })
}
