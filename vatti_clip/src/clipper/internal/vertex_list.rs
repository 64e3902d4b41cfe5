//! Conversion of input paths into circular vertex lists and local minima for the sweep.
use crate::{
    clipper::{ClipperOptions, PathType},
    core::{math::Vector2, traits::Real},
    path::Path,
};
use std::ops;

pub type VertexIdx = usize;

/// Classification flags of an input vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct VertexFlags(u8);

impl VertexFlags {
    pub const NONE: VertexFlags = VertexFlags(0);
    pub const OPEN_START: VertexFlags = VertexFlags(1);
    pub const OPEN_END: VertexFlags = VertexFlags(2);
    pub const LOCAL_MAX: VertexFlags = VertexFlags(4);
    pub const LOCAL_MIN: VertexFlags = VertexFlags(8);

    /// Returns `true` if any of the flags in `other` are set.
    #[inline]
    pub fn intersects(self, other: VertexFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: VertexFlags) {
        self.0 |= other.0;
    }
}

impl ops::BitOr for VertexFlags {
    type Output = VertexFlags;
    fn bitor(self, rhs: VertexFlags) -> Self::Output {
        VertexFlags(self.0 | rhs.0)
    }
}

/// Input path vertex, linked into a circular list with the other vertexes of its path.
#[derive(Debug, Copy, Clone)]
pub struct Vertex<T> {
    pub pt: Vector2<T>,
    pub next: VertexIdx,
    pub prev: VertexIdx,
    pub flags: VertexFlags,
}

impl<T> Vertex<T> {
    #[inline]
    pub fn is_maxima(&self) -> bool {
        self.flags.intersects(VertexFlags::LOCAL_MAX)
    }

    #[inline]
    pub fn is_open_end(&self) -> bool {
        self.flags
            .intersects(VertexFlags::OPEN_START | VertexFlags::OPEN_END)
    }
}

/// Vertex where a path changes from descending to ascending in Y, edges enter the sweep here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocalMinima {
    pub vertex: VertexIdx,
    pub path_type: PathType,
    pub is_open: bool,
}

fn add_local_min<T>(
    vertex: VertexIdx,
    path_type: PathType,
    is_open: bool,
    vertices: &mut [Vertex<T>],
    minima: &mut Vec<LocalMinima>,
) {
    // only ever add a vertex once
    if vertices[vertex].flags.intersects(VertexFlags::LOCAL_MIN) {
        return;
    }

    vertices[vertex].flags.insert(VertexFlags::LOCAL_MIN);
    minima.push(LocalMinima {
        vertex,
        path_type,
        is_open,
    });
}

/// Append the vertexes of all `paths` to `vertices` and register their local minima in `minima`.
///
/// Consecutive duplicate points (within `options.eps`) and non-finite points are skipped. Paths
/// which collapse to a single point, or closed paths which are completely flat, are dropped.
/// Returns the number of paths added.
pub fn add_paths_to_vertex_list<T, P>(
    paths: &[P],
    path_type: PathType,
    is_open: bool,
    options: &ClipperOptions<T>,
    vertices: &mut Vec<Vertex<T>>,
    minima: &mut Vec<LocalMinima>,
) -> usize
where
    T: Real,
    P: AsRef<[Vector2<T>]>,
{
    let mut added = 0;
    let mut pts: Vec<Vector2<T>> = Vec::new();
    for path in paths {
        pts.clear();
        for &raw in path.as_ref() {
            if !raw.is_finite() {
                continue;
            }
            let pt = match options.precision {
                Some(p) => raw.round_to(p),
                None => raw,
            };
            if pts.last().is_some_and(|last| last.fuzzy_eq_eps(pt, options.eps)) {
                continue;
            }
            pts.push(pt);
        }

        if !is_open {
            while pts.len() > 1 && pts[pts.len() - 1].fuzzy_eq_eps(pts[0], options.eps) {
                pts.pop();
            }
        }

        if pts.len() < 2 {
            log::trace!("dropping degenerate {:?} path with {} point(s)", path_type, pts.len());
            continue;
        }

        let base = vertices.len();
        let n = pts.len();
        vertices.extend(pts.iter().enumerate().map(|(i, &pt)| Vertex {
            pt,
            next: base + (i + 1) % n,
            prev: base + (i + n - 1) % n,
            flags: VertexFlags::NONE,
        }));

        if classify_path(base, path_type, is_open, vertices, minima) {
            added += 1;
        } else {
            log::trace!("dropping flat closed {:?} path", path_type);
            vertices.truncate(base);
        }
    }

    added
}

/// Tag the local maxima and register the local minima of the path starting at vertex `v0`.
/// Returns false if the path is closed and completely flat (nothing is registered).
fn classify_path<T>(
    v0: VertexIdx,
    path_type: PathType,
    is_open: bool,
    vertices: &mut [Vertex<T>],
    minima: &mut Vec<LocalMinima>,
) -> bool
where
    T: Real,
{
    let y0 = vertices[v0].pt.y;
    // "going up" is toward the top of the sweep, i.e. decreasing Y
    let mut going_up;
    if is_open {
        let mut curr = vertices[v0].next;
        while curr != v0 && vertices[curr].pt.y == y0 {
            curr = vertices[curr].next;
        }
        going_up = vertices[curr].pt.y <= y0;
        if going_up {
            vertices[v0].flags = VertexFlags::OPEN_START;
            add_local_min(v0, path_type, true, vertices, minima);
        } else {
            vertices[v0].flags = VertexFlags::OPEN_START | VertexFlags::LOCAL_MAX;
        }
    } else {
        let mut prev = vertices[v0].prev;
        while prev != v0 && vertices[prev].pt.y == y0 {
            prev = vertices[prev].prev;
        }
        if prev == v0 {
            return false;
        }
        going_up = vertices[prev].pt.y > y0;
    }

    let going_up0 = going_up;
    let mut prev = v0;
    let mut curr = vertices[v0].next;
    while curr != v0 {
        let (prev_y, curr_y) = (vertices[prev].pt.y, vertices[curr].pt.y);
        if curr_y > prev_y && going_up {
            vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
            going_up = false;
        } else if curr_y < prev_y && !going_up {
            going_up = true;
            add_local_min(prev, path_type, is_open, vertices, minima);
        }
        prev = curr;
        curr = vertices[curr].next;
    }

    if is_open {
        vertices[prev].flags.insert(VertexFlags::OPEN_END);
        if going_up {
            vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
        } else {
            add_local_min(prev, path_type, is_open, vertices, minima);
        }
    } else if going_up != going_up0 {
        if going_up0 {
            add_local_min(prev, path_type, false, vertices, minima);
        } else {
            vertices[prev].flags.insert(VertexFlags::LOCAL_MAX);
        }
    }

    true
}

/// Pre-built vertex and local minima lists which can be added to any number of
/// [Clipper](crate::clipper::Clipper) sessions without classifying the input paths again.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let mut reusable = ReusableData::<f64>::new();
/// reusable.add_paths(
///     &vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]],
///     PathType::Subject,
///     false,
/// );
///
/// for offset in [2.0, 4.0] {
///     let mut clipper = Clipper::new();
///     clipper.add_reusable_data(&reusable);
///     clipper.add_clip(&vec![path![
///         (offset, offset),
///         (20.0, offset),
///         (20.0, 20.0),
///         (offset, 20.0)
///     ]]);
///     let solution = clipper.execute(ClipType::Intersection, FillRule::NonZero).unwrap();
///     let expected = (10.0 - offset) * (10.0 - offset);
///     assert!((paths_area(&solution.closed).abs() - expected).abs() < 1e-9);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReusableData<T = f64>
where
    T: Real,
{
    pub(crate) options: ClipperOptions<T>,
    pub(crate) vertices: Vec<Vertex<T>>,
    pub(crate) minima: Vec<LocalMinima>,
    pub(crate) has_open_paths: bool,
}

impl<T> ReusableData<T>
where
    T: Real,
{
    /// Create an empty container using default [ClipperOptions] for ingest.
    pub fn new() -> Self {
        Self::with_options(ClipperOptions::new())
    }

    /// Create an empty container, `options` control how points are ingested (`eps` and
    /// `precision`).
    pub fn with_options(options: ClipperOptions<T>) -> Self {
        Self {
            options,
            vertices: Vec::new(),
            minima: Vec::new(),
            has_open_paths: false,
        }
    }

    /// Classify and store `paths`.
    pub fn add_paths(&mut self, paths: &[Path<T>], path_type: PathType, is_open: bool) {
        if is_open && path_type == PathType::Clip {
            log::trace!("ignoring {} open clip path(s)", paths.len());
            return;
        }

        self.has_open_paths |= is_open;
        add_paths_to_vertex_list(
            paths,
            path_type,
            is_open,
            &self.options,
            &mut self.vertices,
            &mut self.minima,
        );
    }

    /// Remove all stored paths.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.minima.clear();
        self.has_open_paths = false;
    }

    /// Returns `true` if no paths are stored.
    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }
}

impl<T> Default for ReusableData<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}
