//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collection editors look records up by this id, so two live records in the
/// same collection must never share one.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
