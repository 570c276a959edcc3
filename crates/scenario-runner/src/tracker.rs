use indexmap::IndexMap;
use scenario_core::{ResourceHandle, ResourceKey, ResourceKind};

use crate::error::DuplicateResourceError;

/// Records the resources created while a scenario runs.
///
/// Insertion order is creation order; [`all_tracked`](Self::all_tracked)
/// yields the reverse of it, which is the order compensations must run in.
#[derive(Debug, Default, Clone)]
pub struct ResourceTracker {
    resources: IndexMap<ResourceKey, ResourceHandle>,
}

impl ResourceTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `handle`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResourceError` if a resource with the same kind and
    /// identifier is already tracked. The tracker is left unchanged.
    pub fn track(&mut self, handle: ResourceHandle) -> Result<(), DuplicateResourceError> {
        let key = handle.key();
        if self.resources.contains_key(&key) {
            return Err(DuplicateResourceError {
                kind: key.kind,
                identifier: key.identifier,
            });
        }
        self.resources.insert(key, handle);
        Ok(())
    }

    /// Stop tracking `handle`, returning the tracked entry if there was one.
    pub fn untrack(&mut self, handle: &ResourceHandle) -> Option<ResourceHandle> {
        self.resources.shift_remove(&handle.key())
    }

    /// Tracked resources, most recently created first.
    pub fn all_tracked(&self) -> impl DoubleEndedIterator<Item = &ResourceHandle> + '_ {
        self.resources.values().rev()
    }

    #[must_use]
    pub fn contains(&self, kind: ResourceKind, identifier: &str) -> bool {
        self.resources.contains_key(&ResourceKey {
            kind,
            identifier: identifier.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(kind: ResourceKind, id: &str) -> ResourceHandle {
        ResourceHandle::new(kind, id)
    }

    fn identifiers(tracker: &ResourceTracker) -> Vec<String> {
        tracker
            .all_tracked()
            .map(|r| r.identifier.clone())
            .collect()
    }

    #[test]
    fn new_tracker_is_empty() {
        let tracker = ResourceTracker::new();

        assert!(tracker.is_empty());
        assert_eq!(tracker.len(), 0);
        assert_eq!(tracker.all_tracked().count(), 0);
    }

    #[test]
    fn all_tracked_yields_reverse_creation_order() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Role, "role"))
            .expect("track role");
        tracker
            .track(handle(ResourceKind::Activity, "activity"))
            .expect("track activity");
        tracker
            .track(handle(ResourceKind::StateMachine, "sm"))
            .expect("track state machine");

        assert_eq!(identifiers(&tracker), ["sm", "activity", "role"]);
    }

    #[test]
    fn duplicate_track_fails_and_leaves_tracker_unchanged() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Activity, "a"))
            .expect("first track");
        tracker
            .track(handle(ResourceKind::Bucket, "q"))
            .expect("second track");

        let result = tracker.track(handle(ResourceKind::Activity, "a"));

        let err = result.expect_err("duplicate must fail");
        assert_eq!(err.kind, ResourceKind::Activity);
        assert_eq!(err.identifier, "a");
        assert_eq!(identifiers(&tracker), ["q", "a"]);
    }

    #[test]
    fn same_identifier_with_different_kind_is_not_a_duplicate() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Role, "shared"))
            .expect("track role");

        let result = tracker.track(handle(ResourceKind::Activity, "shared"));

        assert!(result.is_ok());
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn untrack_absent_handle_is_noop() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Role, "role"))
            .expect("track role");

        let removed = tracker.untrack(&handle(ResourceKind::Role, "other"));

        assert!(removed.is_none());
        assert_eq!(identifiers(&tracker), ["role"]);
    }

    #[test]
    fn untrack_twice_is_idempotent() {
        let mut tracker = ResourceTracker::new();
        let role = handle(ResourceKind::Role, "role");
        tracker.track(role.clone()).expect("track role");

        assert!(tracker.untrack(&role).is_some());
        assert!(tracker.untrack(&role).is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn untrack_preserves_order_of_remaining() {
        let mut tracker = ResourceTracker::new();
        for id in ["a", "b", "c"] {
            tracker
                .track(handle(ResourceKind::Object, id))
                .expect("track object");
        }

        tracker.untrack(&handle(ResourceKind::Object, "b"));

        assert_eq!(identifiers(&tracker), ["c", "a"]);
    }

    #[test]
    fn contains_checks_kind_and_identifier() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Bucket, "bucket"))
            .expect("track bucket");

        assert!(tracker.contains(ResourceKind::Bucket, "bucket"));
        assert!(!tracker.contains(ResourceKind::Object, "bucket"));
    }

    #[test]
    fn untrack_matches_on_identity_not_timestamp() {
        let mut tracker = ResourceTracker::new();
        tracker
            .track(handle(ResourceKind::Activity, "a"))
            .expect("track activity");

        let later = handle(ResourceKind::Activity, "a");
        let removed = tracker.untrack(&later);

        assert!(removed.is_some());
    }
}
