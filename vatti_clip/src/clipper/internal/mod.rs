//! Internal sweep modules made public for benchmarking and testing purposes.
//!
//! Not expected to be used directly as part of the library but may be used to help learn about the
//! algorithm. All mutable sweep state lives in [SweepState], the phases of the sweep are split
//! across the modules as `impl` blocks on it.
pub mod active_edge;
pub mod horizontal;
pub mod intersect;
pub mod out_rec;
pub mod output_ring;
pub mod resolve;
pub mod sweep;
pub mod vertex_list;

pub use sweep::SweepState;
pub use vertex_list::ReusableData;
