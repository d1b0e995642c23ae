//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, or `None` while the entity has not been
    /// persisted yet (the store assigns identity).
    fn id(&self) -> Option<&Self::Id>;

    /// Whether the store has assigned an identity to this entity.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
