//! The four-valued nullability lattice (spec §3).
use std::fmt;

/// The status of an abstract pointer node.
///
/// Ordering (least to most information, ignoring the poison element):
/// `DONT_KNOW < {NIL, NON_NIL}`. `UNDEFINED` is not part of the nullability
/// order at all — it absorbs every meet/join because it marks a value
/// poisoned by an earlier unsafe dereference, not a nullability fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerStatus {
    Nil,
    NonNil,
    DontKnow,
    Undefined,
}

impl PointerStatus {
    /// Greatest lower bound: refines a single fact with another observation
    /// of the same value.
    ///
    /// - `DONT_KNOW ⊓ NIL = NIL`, `DONT_KNOW ⊓ NON_NIL = NON_NIL`
    /// - `NIL ⊓ NON_NIL = DONT_KNOW` (contradictory facts collapse to "either")
    /// - `UNDEFINED` absorbs: `UNDEFINED ⊓ x = UNDEFINED`
    #[must_use]
    pub const fn meet(self, other: Self) -> Self {
        match (self, other) {
            (Self::Undefined, _) | (_, Self::Undefined) => Self::Undefined,
            (Self::DontKnow, x) | (x, Self::DontKnow) => x,
            (Self::Nil, Self::Nil) => Self::Nil,
            (Self::NonNil, Self::NonNil) => Self::NonNil,
            (Self::Nil, Self::NonNil) | (Self::NonNil, Self::Nil) => Self::DontKnow,
        }
    }

    /// Least upper bound, the dual of [`Self::meet`]: used when merging
    /// facts observed along different control-flow paths.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        match (self, other) {
            (Self::Undefined, _) | (_, Self::Undefined) => Self::Undefined,
            (Self::DontKnow, _) | (_, Self::DontKnow) => Self::DontKnow,
            (Self::Nil, Self::Nil) => Self::Nil,
            (Self::NonNil, Self::NonNil) => Self::NonNil,
            (Self::Nil, Self::NonNil) | (Self::NonNil, Self::Nil) => Self::DontKnow,
        }
    }

    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for PointerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "NIL"),
            Self::NonNil => write!(f, "NON_NIL"),
            Self::DontKnow => write!(f, "DONT_KNOW"),
            Self::Undefined => write!(f, "UNDEFINED"),
        }
    }
}
