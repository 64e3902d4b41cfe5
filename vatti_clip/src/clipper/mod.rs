//! Boolean clipping of polygons and polylines using a Vatti scanline sweep.
//!
//! A [Clipper] session holds classified input paths, executing it sweeps a horizontal line across
//! the input (from the largest Y to the smallest) maintaining the set of edges crossing the line.
//! Output rings are built as edge pairs enter and leave the regions selected by the [ClipType] and
//! [FillRule].
pub mod internal;
mod boolean_ops;
mod clip_types;
mod poly_tree;
mod session;

pub use boolean_ops::*;
pub use clip_types::*;
pub use internal::ReusableData;
pub use poly_tree::*;
pub use session::*;
