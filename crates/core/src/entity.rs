//! Entity trait: records with a stable identity.

/// A stored record addressed by its identifier.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
