use super::FuzzyEq;
use static_aabb2d_index::IndexableNum;
use std::cmp::Ordering;

/// Trait representing a real number coordinate (e.g. 1.1, -3.5, etc.) used by the clipping engine.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyEq
    + std::default::Default
    + std::fmt::Debug
    + std::fmt::Display
    + IndexableNum
    + 'static
{
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    #[inline]
    fn tau() -> Self {
        Self::from(std::f64::consts::TAU).unwrap()
    }

    /// Largest finite value, used as the inverse slope of horizontal edges.
    #[inline]
    fn max_real() -> Self {
        <Self as num_traits::Bounded>::max_value()
    }

    /// Returns `true` if this value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Total ordering for finite values. Incomparable values (NaN) compare as equal, the engine
    /// never ingests them.
    #[inline]
    fn cmp_real(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl Real for f32 {
    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn half() -> Self {
        0.5f32
    }

    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Real for f64 {
    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn half() -> Self {
        0.5f64
    }

    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}
