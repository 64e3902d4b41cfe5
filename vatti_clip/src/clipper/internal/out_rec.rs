use super::active_edge::{ActiveIdx, OutRecIdx};
use crate::{
    core::{math::Vector2, traits::Real},
    path::Path,
};
use static_aabb2d_index::AABB;

pub type OutPtIdx = usize;

/// Vertex of an output ring, linked in a circular list with the other vertexes of its ring.
#[derive(Debug, Copy, Clone)]
pub struct OutPt<T> {
    pub pt: Vector2<T>,
    pub next: OutPtIdx,
    pub prev: OutPtIdx,
    pub outrec: OutRecIdx,
    /// Set once this point anchors a horizontal segment.
    pub anchors_horz: bool,
}

/// Output contour under construction.
///
/// An outrec with `pts == None` is a dead stub: its ring was merged into (or consumed by) another
/// outrec, it is kept only so owner chains passing through it can be redirected.
#[derive(Debug, Clone)]
pub struct OutRec<T>
where
    T: Real,
{
    pub owner: Option<OutRecIdx>,
    pub front_edge: Option<ActiveIdx>,
    pub back_edge: Option<ActiveIdx>,
    pub pts: Option<OutPtIdx>,
    pub is_open: bool,
    /// Cached bounds and path, filled in while building the tree output.
    pub bounds: Option<AABB<T>>,
    pub path: Path<T>,
    /// Outrecs split off from this one while resolving self intersects and horizontal joins.
    pub splits: Option<Vec<OutRecIdx>>,
    pub recursive_split: Option<OutRecIdx>,
    /// Node in the output tree once placed.
    pub poly_node: Option<usize>,
}

impl<T> OutRec<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            owner: None,
            front_edge: None,
            back_edge: None,
            pts: None,
            is_open: false,
            bounds: None,
            path: Path::new(),
            splits: None,
            recursive_split: None,
            poly_node: None,
        }
    }
}

/// Horizontal run of output points at a single Y, candidates for joining with an overlapping run
/// heading the opposite direction.
#[derive(Debug, Copy, Clone)]
pub struct HorzSegment {
    pub left_op: OutPtIdx,
    pub right_op: Option<OutPtIdx>,
    pub left_to_right: bool,
}

impl HorzSegment {
    pub fn new(op: OutPtIdx) -> Self {
        Self {
            left_op: op,
            right_op: None,
            left_to_right: true,
        }
    }
}

/// Pair of (duplicated) output points to be linked once the sweep completes.
#[derive(Debug, Copy, Clone)]
pub struct HorzJoin {
    pub op1: OutPtIdx,
    pub op2: OutPtIdx,
}
