//! Score type for search.
//!
//! Scores are plain centipawn-style sums from White's point of view. There is
//! no mate encoding: a finished game is scored like any other snapshot.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Bound used for the open alpha-beta window.
pub const SCORE_INFINITY: i32 = 32000;

/// An evaluation score, positive when White is better.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    pub const ZERO: Score = Score(0);

    #[inline]
    pub const fn cp(value: i32) -> Self {
        Score(value)
    }

    /// Upper end of the search window
    #[inline]
    pub const fn infinity() -> Self {
        Score(SCORE_INFINITY)
    }

    /// Lower end of the search window
    #[inline]
    pub const fn neg_infinity() -> Self {
        Score(-SCORE_INFINITY)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// True for the sentinel window bounds.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 >= SCORE_INFINITY || self.0 <= -SCORE_INFINITY
    }
}

impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Score(self.0 + rhs.0)
    }
}

impl Sub for Score {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Score(self.0 - rhs.0)
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl From<i32> for Score {
    #[inline]
    fn from(v: i32) -> Self {
        Score(v)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp {}", self.0)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}
