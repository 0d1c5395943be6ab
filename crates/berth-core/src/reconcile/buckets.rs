//! Grouping of local extensions and remote registrations by type.

use std::collections::BTreeMap;

use crate::extension::LocalExtension;
use crate::platform::RemoteRegistration;

use super::error::ReconcileError;

/// Unmatched entries of one extension type.
#[derive(Debug, Default)]
pub(crate) struct TypeBucket {
    pub local: Vec<LocalExtension>,
    pub remote: Vec<RemoteRegistration>,
}

/// All per-type buckets of one run.
///
/// Backed by a `BTreeMap` so bucket iteration follows type order and
/// failures are reported deterministically.
#[derive(Debug, Default)]
pub(crate) struct TypeBuckets {
    buckets: BTreeMap<String, TypeBucket>,
}

impl TypeBuckets {
    /// Group both collections by extension type, validating the raw shape
    /// first: an empty local set or a remote count surplus can never be
    /// reconciled, whatever the type composition.
    pub fn build(
        local: &[LocalExtension],
        remote: &[RemoteRegistration],
    ) -> Result<Self, ReconcileError> {
        if local.is_empty() {
            return Err(ReconcileError::NoExtensionsToDeploy);
        }
        if remote.len() > local.len() {
            return Err(ReconcileError::RemoteCountExceedsLocalCount {
                remote: remote.len(),
                local: local.len(),
            });
        }

        let mut buckets = BTreeMap::<String, TypeBucket>::new();
        for extension in local {
            buckets
                .entry(extension.extension_type.clone())
                .or_default()
                .local
                .push(extension.clone());
        }
        for registration in remote {
            buckets
                .entry(registration.extension_type.clone())
                .or_default()
                .remote
                .push(registration.clone());
        }
        Ok(Self { buckets })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeBucket)> {
        self.buckets.iter()
    }

    /// Type of the still-unmatched local extension with this identifier.
    pub fn local_type(&self, local_identifier: &str) -> Option<String> {
        self.buckets.iter().find_map(|(extension_type, bucket)| {
            bucket
                .local
                .iter()
                .any(|e| e.local_identifier == local_identifier)
                .then(|| extension_type.clone())
        })
    }

    /// Remove and return the still-unmatched local extension with this
    /// identifier.
    pub fn take_local(&mut self, local_identifier: &str) -> Option<LocalExtension> {
        for bucket in self.buckets.values_mut() {
            if let Some(index) = bucket
                .local
                .iter()
                .position(|e| e.local_identifier == local_identifier)
            {
                return Some(bucket.local.remove(index));
            }
        }
        None
    }

    /// Remove and return the registration with this uuid from the given
    /// type's bucket. A uuid living under a different type is not found.
    pub fn take_remote(&mut self, extension_type: &str, uuid: &str) -> Option<RemoteRegistration> {
        let bucket = self.buckets.get_mut(extension_type)?;
        let index = bucket.remote.iter().position(|r| r.uuid == uuid)?;
        Some(bucket.remote.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(identifier: &str, extension_type: &str) -> LocalExtension {
        LocalExtension::new(identifier, extension_type, identifier)
    }

    fn remote(uuid: &str, extension_type: &str) -> RemoteRegistration {
        RemoteRegistration {
            uuid: uuid.to_string(),
            id: uuid.to_string(),
            title: uuid.to_string(),
            extension_type: extension_type.to_string(),
        }
    }

    #[test]
    fn test_empty_local_set_is_rejected() {
        let result = TypeBuckets::build(&[], &[remote("uuid-a", "checkout_post_purchase")]);
        assert!(matches!(result, Err(ReconcileError::NoExtensionsToDeploy)));
    }

    #[test]
    fn test_remote_surplus_is_rejected_with_counts() {
        let result = TypeBuckets::build(
            &[local("a", "checkout_post_purchase")],
            &[
                remote("uuid-a", "checkout_post_purchase"),
                remote("uuid-a-2", "checkout_post_purchase"),
            ],
        );
        match result {
            Err(ReconcileError::RemoteCountExceedsLocalCount { remote, local }) => {
                assert_eq!(remote, 2);
                assert_eq!(local, 1);
            }
            other => panic!("expected count surplus error, got {other:?}"),
        }
    }

    #[test]
    fn test_both_sides_group_under_the_same_type_key() {
        let buckets = TypeBuckets::build(
            &[
                local("a", "checkout_post_purchase"),
                local("b", "subscription_management"),
            ],
            &[remote("uuid-a", "checkout_post_purchase")],
        )
        .unwrap();

        let checkout = buckets
            .iter()
            .find(|(t, _)| t.as_str() == "checkout_post_purchase")
            .map(|(_, b)| b)
            .unwrap();
        assert_eq!(checkout.local.len(), 1);
        assert_eq!(checkout.remote.len(), 1);

        let subscription = buckets
            .iter()
            .find(|(t, _)| t.as_str() == "subscription_management")
            .map(|(_, b)| b)
            .unwrap();
        assert_eq!(subscription.local.len(), 1);
        assert!(subscription.remote.is_empty());
    }

    #[test]
    fn test_take_remote_requires_matching_type() {
        let mut buckets = TypeBuckets::build(
            &[local("a", "checkout_post_purchase")],
            &[remote("uuid-a", "checkout_post_purchase")],
        )
        .unwrap();

        assert!(buckets.take_remote("subscription_management", "uuid-a").is_none());
        assert!(buckets.take_remote("checkout_post_purchase", "uuid-a").is_some());
        // Already taken
        assert!(buckets.take_remote("checkout_post_purchase", "uuid-a").is_none());
    }
}
