/// Trait for control flow inside visiting methods.
///
/// Visitors passed to tree walks return a value implementing this trait to either continue or stop
/// the walk early.
///
/// # Examples
///
/// ```
/// # use vatti_clip::core::*;
/// # use vatti_clip::*;
/// let mut clipper = Clipper::new();
/// clipper.add_subject(&vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
/// clipper.add_subject(&vec![path![(20.0, 0.0), (30.0, 0.0), (30.0, 10.0), (20.0, 10.0)]]);
/// let solution = clipper.execute_tree(ClipType::Union, FillRule::NonZero).unwrap();
///
/// let mut visited = 0;
/// solution.tree.visit_depth_first(|_node| {
///     visited += 1;
///     // Return Control::Break to stop iteration early
///     Control::Break(())
/// });
///
/// assert_eq!(visited, 1);
/// ```
pub trait ControlFlow {
    /// Constructs state indicating to continue iteration/visiting.
    fn continuing() -> Self;

    /// Returns `true` if control flow should break/stop iteration.
    fn should_break(&self) -> bool;
}

impl ControlFlow for () {
    #[inline]
    fn continuing() -> Self {}

    #[inline]
    fn should_break(&self) -> bool {
        false
    }
}
