use crate::core::traits::Real;
use std::{cmp::Ordering, ops};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D point/vector, every path vertex and output ring point is one of these.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vector2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Real,
{
    /// Create a new vector with x and y components.
    pub fn new(x: T, y: T) -> Self {
        Vector2 { x, y }
    }

    /// Create a zero vector (x = 0, y = 0).
    pub fn zero() -> Self {
        Vector2::new(T::zero(), T::zero())
    }

    /// Uniformly scale the vector by `scale_factor`.
    pub fn scale(&self, scale_factor: T) -> Self {
        vec2(scale_factor * self.x, scale_factor * self.y)
    }

    /// Dot product.
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Compute the perpendicular dot product (`self.x * other.y - self.y * other.x`).
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Squared length of the vector.
    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    /// Returns `true` if both components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Fuzzy equal comparison with another vector using `fuzzy_epsilon` given.
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another vector using T::fuzzy_epsilon().
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Lexicographic (x then y) ordering.
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.x
            .cmp_real(&other.x)
            .then_with(|| self.y.cmp_real(&other.y))
    }

    /// Round both components to `decimals` decimal places (negative values round to tens,
    /// hundreds, etc.).
    pub fn round_to(&self, decimals: i32) -> Self {
        let scale = T::from(10.0).unwrap().powi(decimals);
        vec2((self.x * scale).round() / scale, (self.y * scale).round() / scale)
    }
}

#[inline(always)]
pub fn vec2<T>(x: T, y: T) -> Vector2<T>
where
    T: Real,
{
    Vector2::new(x, y)
}

macro_rules! ImplBinaryOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<&Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: &Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<'a, 'b, T: Real> ops::$op_trait<&'b Vector2<T>> for &'a Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: &'b Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

ImplBinaryOp!(Add, add, +);
ImplBinaryOp!(Sub, sub, -);

impl<T: Real> ops::Neg for Vector2<T> {
    type Output = Vector2<T>;
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}
