use super::{
    internal::{
        sweep::SweepState,
        vertex_list::{add_paths_to_vertex_list, LocalMinima, Vertex},
        ReusableData,
    },
    ClipError, ClipSolution, ClipType, ClipperOptions, FillRule, PathType, PolyTree, TreeSolution,
};
use crate::{
    core::{math::Vector2, traits::Real},
    path::{extend_bounds, Path},
};
use static_aabb2d_index::AABB;

/// Clipping session, holds the classified input paths and executes boolean operations on them.
///
/// Input is added as subject or clip paths (closed or open) and may be executed any number of
/// times with different clip types and fill rules. All intermediate sweep state is created fresh
/// for each execution and dropped with it.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let mut clipper = Clipper::<f64>::new();
/// clipper.add_subject(&vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
/// clipper.add_clip(&vec![path![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]]);
///
/// let intersection = clipper.execute(ClipType::Intersection, FillRule::NonZero).unwrap();
/// assert_eq!(intersection.closed.len(), 1);
/// assert!((paths_area(&intersection.closed) - 25.0).abs() < 1e-9);
///
/// // same input executed again with a different operation
/// let union = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
/// assert!((paths_area(&union.closed) - 175.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Clipper<T = f64>
where
    T: Real,
{
    options: ClipperOptions<T>,
    vertices: Vec<Vertex<T>>,
    minima: Vec<LocalMinima>,
    minima_sorted: bool,
    has_open_paths: bool,
}

impl<T> Clipper<T>
where
    T: Real,
{
    /// Create a session with default [ClipperOptions].
    #[inline]
    pub fn new() -> Self {
        Self {
            options: ClipperOptions::new(),
            vertices: Vec::new(),
            minima: Vec::new(),
            minima_sorted: true,
            has_open_paths: false,
        }
    }

    /// Create a session with `options`, returns an error if any option value is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vatti_clip::*;
    /// let mut options = ClipperOptions::new();
    /// options.reverse_solution = true;
    /// assert!(Clipper::<f64>::with_options(options).is_ok());
    ///
    /// options.eps = f64::NAN;
    /// assert!(matches!(
    ///     Clipper::<f64>::with_options(options),
    ///     Err(ClipError::InvalidTolerance { name: "eps", .. })
    /// ));
    /// ```
    pub fn with_options(options: ClipperOptions<T>) -> Result<Self, ClipError> {
        options.validate()?;
        let mut result = Self::new();
        result.options = options;
        Ok(result)
    }

    #[inline]
    pub fn options(&self) -> &ClipperOptions<T> {
        &self.options
    }

    /// Add a single path.
    pub fn add_path(&mut self, path: &[Vector2<T>], path_type: PathType, is_open: bool) {
        self.add_ingested(std::slice::from_ref(&path), path_type, is_open);
    }

    /// Add `paths`, open paths are only supported as subjects (open clip paths are ignored).
    pub fn add_paths(&mut self, paths: &[Path<T>], path_type: PathType, is_open: bool) {
        self.add_ingested(paths, path_type, is_open);
    }

    fn add_ingested<P>(&mut self, paths: &[P], path_type: PathType, is_open: bool)
    where
        P: AsRef<[Vector2<T>]>,
    {
        if is_open && path_type == PathType::Clip {
            log::trace!("ignoring {} open clip path(s)", paths.len());
            return;
        }

        self.has_open_paths |= is_open;
        let added = add_paths_to_vertex_list(
            paths,
            path_type,
            is_open,
            &self.options,
            &mut self.vertices,
            &mut self.minima,
        );
        if added > 0 {
            self.minima_sorted = false;
        }
    }

    /// Add closed subject paths.
    #[inline]
    pub fn add_subject(&mut self, paths: &[Path<T>]) {
        self.add_paths(paths, PathType::Subject, false);
    }

    /// Add open subject paths (polylines).
    #[inline]
    pub fn add_open_subject(&mut self, paths: &[Path<T>]) {
        self.add_paths(paths, PathType::Subject, true);
    }

    /// Add closed clip paths.
    #[inline]
    pub fn add_clip(&mut self, paths: &[Path<T>]) {
        self.add_paths(paths, PathType::Clip, false);
    }

    /// Add all paths already classified in `data`.
    pub fn add_reusable_data(&mut self, data: &ReusableData<T>) {
        if data.is_empty() {
            return;
        }

        let offset = self.vertices.len();
        self.vertices.extend(data.vertices.iter().map(|v| Vertex {
            next: v.next + offset,
            prev: v.prev + offset,
            ..*v
        }));
        self.minima.extend(data.minima.iter().map(|lm| LocalMinima {
            vertex: lm.vertex + offset,
            ..*lm
        }));
        self.has_open_paths |= data.has_open_paths;
        self.minima_sorted = false;
    }

    /// Remove all input paths.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.minima.clear();
        self.minima_sorted = true;
        self.has_open_paths = false;
    }

    /// Returns `true` if no input paths have been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }

    /// Bounding box of all input points, `None` if there is no input.
    pub fn bounds(&self) -> Option<AABB<T>> {
        let (first, rest) = self.vertices.split_first()?;
        let mut result = AABB::new(first.pt.x, first.pt.y, first.pt.x, first.pt.y);
        for v in rest {
            extend_bounds(&mut result, v.pt);
        }
        Some(result)
    }

    fn sort_minima(&mut self) {
        if self.minima_sorted {
            return;
        }

        let vertices = &self.vertices;
        self.minima
            .sort_by(|a, b| vertices[b.vertex].pt.y.cmp_real(&vertices[a.vertex].pt.y));
        self.minima_sorted = true;
    }

    fn run_sweep<R, F>(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
        using_tree: bool,
        build: F,
    ) -> Result<R, ClipError>
    where
        F: FnOnce(&mut SweepState<'_, T>) -> R,
    {
        self.sort_minima();
        log::debug!(
            "executing {:?} with {:?} fill rule on {} local minima",
            clip_type,
            fill_rule,
            self.minima.len()
        );

        let mut state = SweepState::new(
            &self.vertices,
            &self.minima,
            &self.options,
            self.has_open_paths,
        );
        state.execute(clip_type, fill_rule, using_tree);
        state.collect_output(build)
    }

    /// Execute the boolean operation, returning flat closed and open paths.
    ///
    /// Closed outer paths are counter clockwise (positive area) and holes clockwise unless
    /// [ClipperOptions::reverse_solution] is set. Executing with [ClipType::NoClip] returns an
    /// empty solution.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<ClipSolution<T>, ClipError> {
        let (closed, open) = self.run_sweep(clip_type, fill_rule, false, |s| s.build_paths())?;
        log::debug!(
            "{:?} produced {} closed and {} open path(s)",
            clip_type,
            closed.len(),
            open.len()
        );
        Ok(ClipSolution { closed, open })
    }

    /// Execute the boolean operation, returning closed paths nested by containment in a
    /// [PolyTree] and the open paths.
    pub fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<TreeSolution<T>, ClipError> {
        let mut tree = PolyTree::new();
        let open = self.run_sweep(clip_type, fill_rule, true, |s| s.build_tree(&mut tree))?;
        log::debug!(
            "{:?} produced tree with {} closed and {} open path(s)",
            clip_type,
            tree.len(),
            open.len()
        );
        Ok(TreeSolution { tree, open })
    }
}

impl<T> Default for Clipper<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
