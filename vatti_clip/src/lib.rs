//! 2D polygon and polyline boolean operations (intersection, union, difference, and xor) using a
//! Vatti scanline sweep.
//!
//! Input paths are added to a [Clipper] session as subjects or clips, executing the session
//! produces the regions selected by a [ClipType] under a [FillRule], either as flat paths or
//! nested in a [PolyTree]. Free functions such as [intersect] and [union] wrap a single session
//! for one shot operations.
//!
//! # Examples
//!
//! ```
//! use vatti_clip::*;
//! let subject: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
//! let clip = vec![path![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]];
//!
//! let result = intersect(&subject, &clip, FillRule::NonZero).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].len(), 4);
//! assert!((path_area(&result[0]) - 25.0).abs() < 1e-9);
//!
//! let result = difference(&subject, &clip, FillRule::NonZero).unwrap();
//! assert!((paths_area(&result) - 75.0).abs() < 1e-9);
//! ```
#[macro_use]
mod macros;
#[macro_use]
pub mod core;
pub mod clipper;
pub mod path;

pub use static_aabb2d_index::AABB;

pub use crate::clipper::*;
pub use crate::core::math::{vec2, Vector2};
pub use crate::path::*;
