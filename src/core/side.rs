//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Type-safe identity for the two players of a match: `Left` and `Right`.
//!
//! ## SidePair
//!
//! Per-side data storage indexed by `Side`. Used for questions, input
//! buffers, and anything else the engine keeps one-of-each.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players of a match.
///
/// The left side is always the human starting player; the right side is
/// either a second human or the simulated opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Both sides, left first.
    pub fn both() -> impl Iterator<Item = Side> {
        [Side::Left, Side::Right].into_iter()
    }

    /// Index into a two-element array: Left = 0, Right = 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use math_tug::core::{Side, SidePair};
///
/// let mut steps: SidePair<u32> = SidePair::with_value(0);
/// steps[Side::Left] = 3;
/// assert_eq!(steps[Side::Left], 3);
/// assert_eq!(steps[Side::Right], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SidePair<T> {
    data: [T; 2],
}

impl<T> SidePair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Left), factory(Side::Right)],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Iterate over `(Side, &T)` entries, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::both().map(move |s| (s, &self.data[s.index()]))
    }

    /// Apply a function to each entry in place.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Side, &mut T)) {
        for side in Side::both() {
            f(side, &mut self.data[side.index()]);
        }
    }
}

impl<T: Default> Default for SidePair<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }
}
