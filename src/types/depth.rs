//! Search depth in plies.

use std::fmt;
use std::ops::Sub;

/// Search depth (in plies).
///
/// Stored signed so that a caller-supplied depth of zero or less can be
/// represented and rejected instead of silently wrapping.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct Depth(pub i32);

impl Depth {
    pub const ZERO: Depth = Depth(0);
    pub const ONE: Depth = Depth(1);

    #[inline]
    pub const fn new(d: i32) -> Self {
        Depth(d)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Leaf depth: no further plies are searched.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        self.0 <= 0
    }
}

impl Sub<i32> for Depth {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Depth(self.0 - rhs)
    }
}

impl From<i32> for Depth {
    #[inline]
    fn from(d: i32) -> Self {
        Depth(d)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
