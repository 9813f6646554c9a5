//! Entity trait: identity that survives state changes.

/// Entity marker + minimal interface.
///
/// An inventory item keeps its identity (its name) while quantity and
/// received date change underneath it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
