//! Identifier issuance and the association from entity ids to domain objects.

use std::collections::{btree_map::Entry, BTreeMap};

use harbor_core::{EntityId, RegistryError};

/// Registry that issues entity identifiers and resolves them to domain objects.
///
/// Identifiers are never reused: every call to [`EntityRegistry::allocate_id`]
/// returns an id strictly greater than all ids issued before it.
#[derive(Clone, Debug)]
pub struct EntityRegistry<E> {
    entries: BTreeMap<EntityId, E>,
    next_id: EntityId,
}

impl<E> Default for EntityRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EntityRegistry<E> {
    /// Creates an empty registry with a reset identifier counter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: EntityId::new(0),
        }
    }

    /// Issues a fresh identifier. The identifier is not registered yet.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = EntityId::new(id.get() + 1);
        id
    }

    /// Associates the identifier with a domain object.
    pub fn register(&mut self, id: EntityId, entity: E) -> Result<(), RegistryError> {
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateId(id)),
            Entry::Vacant(slot) => {
                let _ = slot.insert(entity);
                Ok(())
            }
        }
    }

    /// Resolves the identifier, returning `None` for unknown or cleared ids.
    #[must_use]
    pub fn resolve(&self, id: EntityId) -> Option<&E> {
        self.entries.get(&id)
    }

    /// Clears the association. Unknown ids are ignored.
    pub fn unregister(&mut self, id: EntityId) -> Option<E> {
        self.entries.remove(&id)
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every association, returning how many were released.
    ///
    /// The identifier counter is not reset.
    pub fn clear(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_ids_increase_strictly() {
        let mut registry: EntityRegistry<&str> = EntityRegistry::new();
        let first = registry.allocate_id();
        let second = registry.allocate_id();
        let _ = registry.clear();
        let third = registry.allocate_id();
        assert!(first < second && second < third);
    }

    #[test]
    fn allocated_id_is_unresolved_until_registered() {
        let mut registry = EntityRegistry::new();
        let id = registry.allocate_id();
        assert_eq!(registry.resolve(id), None);

        registry.register(id, "farm").expect("fresh id registers");
        assert_eq!(registry.resolve(id), Some(&"farm"));

        assert_eq!(registry.unregister(id), Some("farm"));
        assert_eq!(registry.resolve(id), None);
    }

    #[test]
    fn register_rejects_duplicate_ids_and_keeps_original() {
        let mut registry = EntityRegistry::new();
        let id = registry.allocate_id();
        registry.register(id, "farm").expect("fresh id registers");

        assert_eq!(
            registry.register(id, "church"),
            Err(RegistryError::DuplicateId(id))
        );
        assert_eq!(registry.resolve(id), Some(&"farm"));
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = EntityRegistry::new();
        let id = registry.allocate_id();
        registry.register(id, 7_u8).expect("fresh id registers");

        assert_eq!(registry.unregister(id), Some(7));
        assert_eq!(registry.unregister(id), None);
        assert_eq!(registry.unregister(EntityId::new(999)), None);
        assert!(registry.is_empty());
    }
}
