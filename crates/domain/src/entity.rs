//! The identity contract shared by every persisted record.

use std::fmt;

use crate::query::{Column, Include};

/// Numeric identity assigned by the store.
///
/// Zero or negative values mark a transient instance that has never been
/// persisted. Positive values are assumed to exist in storage.
pub type EntityId = i64;

/// A persisted record with a numeric identity.
///
/// `Column` names the queryable fields used to build [`crate::Predicate`]s and
/// orderings; `Include` enumerates the relations that can be eagerly attached
/// when the entity is loaded. Entities without relations use
/// [`crate::NoInclude`].
pub trait Entity: fmt::Debug + Clone + Send + Sync + Unpin + 'static {
    type Column: Column;
    type Include: Include;

    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    /// True when the entity has never been persisted.
    fn is_transient(&self) -> bool {
        self.id() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;

    #[test]
    fn zero_and_negative_ids_are_transient() {
        let mut location = Location::new("Studio A", "1 Main St", "A");
        assert!(location.is_transient());

        location.set_id(-4);
        assert!(location.is_transient());

        location.set_id(7);
        assert!(!location.is_transient());
        assert_eq!(location.id(), 7);
    }
}
