//! Fatal reconciliation failures.

use thiserror::Error;

/// Every failure aborts the whole run: a half-reconciled identifier map
/// could silently redirect later deploys to the wrong registration.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The project defines no extensions; deploying is meaningless
    /// regardless of remote state.
    #[error("There are no extensions to deploy")]
    NoExtensionsToDeploy,

    /// More registrations exist remotely than extensions exist locally.
    /// A raw count surplus can never be resolved by creating more, so the
    /// local checkout itself is suspect (missing extension directories).
    #[error("This app has {remote} registered extensions, but only {local} are locally available.")]
    RemoteCountExceedsLocalCount { remote: usize, local: usize },

    /// Registrations exist for extension types with no local counterpart.
    #[error("We couldn't automatically match your local and remote extensions")]
    UnmatchedRemoteExtensions { extension_types: Vec<String> },

    /// A type had several unmatched candidates on at least one side.
    /// Pairing them by position would risk silently wrong matches, so the
    /// engine refuses to guess.
    #[error("Manual matching is required for extensions of type: {}", .extension_types.join(", "))]
    ManualMatchingRequired { extension_types: Vec<String> },

    /// A platform call failed; the collaborator's error is propagated
    /// unchanged.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}
