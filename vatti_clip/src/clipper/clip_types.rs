//! Supporting public types used by the [Clipper](super::Clipper) session and boolean functions.

use super::PolyTree;
use crate::{core::traits::Real, path::Paths};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation to apply between subject and clip paths.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipType {
    /// No operation, execute returns an empty solution.
    #[default]
    NoClip,
    /// Regions covered by both subject and clip.
    Intersection,
    /// Regions covered by subject or clip.
    Union,
    /// Regions covered by subject but not clip.
    Difference,
    /// Regions covered by subject or clip but not both.
    Xor,
}

/// Rule used to determine which regions of (possibly self intersecting or overlapping) input
/// paths are considered filled, based on the winding count of the region.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Odd winding counts are filled.
    #[default]
    EvenOdd,
    /// Non-zero winding counts are filled.
    NonZero,
    /// Positive winding counts are filled.
    Positive,
    /// Negative winding counts are filled.
    Negative,
}

/// Role of an input path in a boolean operation.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
    Subject,
    Clip,
}

/// Errors returned by the clipping engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipError {
    /// Decimal precision given is outside of the supported `-8..=8` range.
    #[error("precision {0} is out of range, must be between -8 and 8")]
    PrecisionOutOfRange(i32),
    /// A tolerance option is negative, NaN, or infinite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
    /// The sweep hit inconsistent topology and was aborted, no partial output is returned.
    #[error("clipping sweep failed due to inconsistent edge topology")]
    SweepFailed,
}

/// Minimum supported decimal precision.
pub const MIN_PRECISION: i32 = -8;
/// Maximum supported decimal precision.
pub const MAX_PRECISION: i32 = 8;

/// Struct to hold options parameters for a clipping session.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipperOptions<T>
where
    T: Real,
{
    /// Fuzzy comparison epsilon used for determining if two positions coincide (duplicate input
    /// points, output ring end points, collinear cross products, and very small triangles).
    /// Sweep ordering comparisons are always exact.
    pub eps: T,
    /// If true then collinear points along output edges are kept (180 degree spikes are always
    /// removed).
    pub preserve_collinear: bool,
    /// If true then output paths have reversed orientation (outer paths clockwise, holes counter
    /// clockwise).
    pub reverse_solution: bool,
    /// Rings split off while removing output self intersects are discarded if their absolute
    /// area is less than this value.
    pub min_split_area: T,
    /// If set then input coordinates are rounded to this many decimal places when added.
    pub precision: Option<i32>,
}

impl<T> ClipperOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            eps: T::from(1e-10).unwrap(),
            preserve_collinear: true,
            reverse_solution: false,
            min_split_area: T::two(),
            precision: None,
        }
    }

    /// Create default options with input rounded to `precision` decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vatti_clip::*;
    /// let options = ClipperOptions::<f64>::with_precision(3).unwrap();
    /// assert_eq!(options.precision, Some(3));
    /// assert_eq!(
    ///     ClipperOptions::<f64>::with_precision(9),
    ///     Err(ClipError::PrecisionOutOfRange(9))
    /// );
    /// ```
    pub fn with_precision(precision: i32) -> Result<Self, ClipError> {
        let mut result = Self::new();
        result.set_precision(precision)?;
        Ok(result)
    }

    /// Set the input rounding precision, see [ClipperOptions::precision].
    pub fn set_precision(&mut self, precision: i32) -> Result<(), ClipError> {
        check_precision(precision)?;
        self.precision = Some(precision);
        Ok(())
    }

    /// Validate all option values.
    pub fn validate(&self) -> Result<(), ClipError> {
        if let Some(p) = self.precision {
            check_precision(p)?;
        }
        check_tolerance("eps", self.eps)?;
        check_tolerance("min_split_area", self.min_split_area)?;
        Ok(())
    }
}

impl<T> Default for ClipperOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

fn check_precision(precision: i32) -> Result<(), ClipError> {
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        return Err(ClipError::PrecisionOutOfRange(precision));
    }
    Ok(())
}

fn check_tolerance<T>(name: &'static str, value: T) -> Result<(), ClipError>
where
    T: Real,
{
    if !value.is_finite() || value < T::zero() {
        return Err(ClipError::InvalidTolerance {
            name,
            value: value.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Flat result of executing a clip operation.
#[derive(Debug, Clone, Default)]
pub struct ClipSolution<T = f64> {
    /// Closed output paths, outer paths and holes have opposite orientation.
    pub closed: Paths<T>,
    /// Open output paths (from open subject paths).
    pub open: Paths<T>,
}

/// Hierarchical result of executing a clip operation.
#[derive(Debug, Clone)]
pub struct TreeSolution<T = f64>
where
    T: Real,
{
    /// Closed output paths nested by containment.
    pub tree: PolyTree<T>,
    /// Open output paths (from open subject paths).
    pub open: Paths<T>,
}
