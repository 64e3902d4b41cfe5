use crate::{
    core::{
        math::Vector2,
        traits::{ControlFlow, Real},
    },
    path::{path_area, Path, Paths},
};
use std::fmt;

/// Node of a [PolyTree], holds a single closed output path.
#[derive(Debug, Clone)]
pub struct PolyNode<T = f64> {
    polygon: Path<T>,
    parent: Option<usize>,
    children: Vec<usize>,
    level: usize,
}

impl<T> PolyNode<T>
where
    T: Real,
{
    /// Closed path of this node (empty for the root).
    #[inline]
    pub fn polygon(&self) -> &[Vector2<T>] {
        &self.polygon
    }

    /// Index of the parent node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Indexes of the child nodes.
    #[inline]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Nesting depth, the root is level 0 and outermost polygons are level 1.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns `true` if this node is a hole (even, non-zero level).
    #[inline]
    pub fn is_hole(&self) -> bool {
        self.level != 0 && self.level % 2 == 0
    }
}

/// Closed output paths nested by containment.
///
/// Nodes are stored in a flat arena and addressed by index, the root node ([PolyTree::ROOT])
/// holds no polygon. Children of the root are outer polygons, their children are holes, the
/// holes' children are polygons inside the holes, and so on.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let outer: Path<f64> = path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// let hole = path![(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0)];
/// let tree = boolean_op_tree(
///     ClipType::Union,
///     FillRule::EvenOdd,
///     &vec![outer, hole],
///     &Vec::new(),
/// )
/// .unwrap();
///
/// let outer_node = tree.children(PolyTree::<f64>::ROOT)[0];
/// assert!(!tree.node(outer_node).is_hole());
/// let hole_node = tree.children(outer_node)[0];
/// assert!(tree.node(hole_node).is_hole());
/// assert!((tree.area() - 64.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PolyTree<T = f64> {
    nodes: Vec<PolyNode<T>>,
}

impl<T> PolyTree<T>
where
    T: Real,
{
    /// Index of the root node.
    pub const ROOT: usize = 0;

    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![PolyNode {
                polygon: Path::new(),
                parent: None,
                children: Vec::new(),
                level: 0,
            }],
        }
    }

    /// Remove all nodes except the root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[Self::ROOT].children.clear();
    }

    /// Add `polygon` as a child of `parent`, returns the index of the new node.
    pub fn add_child(&mut self, parent: usize, polygon: Path<T>) -> usize {
        let idx = self.nodes.len();
        let level = self.nodes[parent].level + 1;
        self.nodes.push(PolyNode {
            polygon,
            parent: Some(parent),
            children: Vec::new(),
            level,
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &PolyNode<T> {
        &self.nodes[idx]
    }

    #[inline]
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    #[inline]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].parent
    }

    #[inline]
    pub fn polygon(&self, idx: usize) -> &[Vector2<T>] {
        &self.nodes[idx].polygon
    }

    #[inline]
    pub fn level(&self, idx: usize) -> usize {
        self.nodes[idx].level
    }

    #[inline]
    pub fn is_hole(&self, idx: usize) -> bool {
        self.nodes[idx].is_hole()
    }

    /// Number of polygon nodes (the root is not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the tree holds no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit all polygon nodes depth first (parents before their children), the root is not
    /// visited.
    pub fn visit_depth_first<C, F>(&self, mut visitor: F) -> C
    where
        C: ControlFlow,
        F: FnMut(&PolyNode<T>) -> C,
    {
        let mut stack: Vec<usize> = self.nodes[Self::ROOT].children.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            try_cf!(visitor(node));
            stack.extend(node.children.iter().rev());
        }

        C::continuing()
    }

    /// Flatten the tree into a list of paths (depth first order).
    pub fn to_paths(&self) -> Paths<T> {
        let mut result = Vec::with_capacity(self.len());
        self.visit_depth_first(|node| {
            result.push(node.polygon.clone());
        });
        result
    }

    /// Total signed area of all polygons in the tree (hole areas have opposite sign to their
    /// parents so they are subtracted).
    pub fn area(&self) -> T {
        let mut result = T::zero();
        self.visit_depth_first(|node| {
            result = result + path_area(&node.polygon);
        });
        result
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        let node = &self.nodes[idx];
        let indent = "  ".repeat(node.level - 1);
        let kind = if node.is_hole() { "Hole" } else { "Polygon" };
        let child_count = node.children.len();
        write!(f, "{}+- {} ({})", indent, kind, node.level - 1)?;
        if child_count > 0 {
            write!(
                f,
                " contains {} {}",
                child_count,
                if child_count == 1 { "nested path" } else { "nested paths" }
            )?;
        }
        writeln!(f, " with {} points", node.polygon.len())?;
        for &child in &node.children {
            self.fmt_node(f, child)?;
        }
        Ok(())
    }
}

impl<T> Default for PolyTree<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for PolyTree<T>
where
    T: Real,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Polytree with {} polygons", self.nodes[Self::ROOT].children.len())?;
        for &child in &self.nodes[Self::ROOT].children {
            self.fmt_node(f, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq, Control};

    fn square(min: f64, max: f64) -> Path<f64> {
        vec![vec2(min, min), vec2(max, min), vec2(max, max), vec2(min, max)]
    }

    fn nested_tree() -> PolyTree<f64> {
        let mut tree = PolyTree::new();
        let outer = tree.add_child(PolyTree::<f64>::ROOT, square(0.0, 10.0));
        let mut hole = square(2.0, 8.0);
        hole.reverse();
        let hole = tree.add_child(outer, hole);
        tree.add_child(hole, square(4.0, 6.0));
        tree.add_child(PolyTree::<f64>::ROOT, square(20.0, 21.0));
        tree
    }

    #[test]
    fn levels_and_holes() {
        let tree = nested_tree();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(PolyTree::<f64>::ROOT).len(), 2);
        let levels: Vec<(usize, bool)> = (1..=4).map(|i| (tree.level(i), tree.is_hole(i))).collect();
        assert_eq!(levels, vec![(1, false), (2, true), (3, false), (1, false)]);
        assert_eq!(tree.parent(3), Some(2));
        assert_eq!(tree.parent(PolyTree::<f64>::ROOT), None);
        assert_eq!(tree.polygon(4).len(), 4);
    }

    #[test]
    fn area_and_flatten() {
        let tree = nested_tree();
        assert_fuzzy_eq!(tree.area(), 100.0 - 36.0 + 4.0 + 1.0);
        let paths = tree.to_paths();
        assert_eq!(paths.len(), 4);
        // depth first order
        assert_eq!(paths[1][0], vec2(2.0, 8.0));
        assert_eq!(paths[3][0], vec2(20.0, 20.0));
    }

    #[test]
    fn visit_stops_on_break() {
        let tree = nested_tree();
        let mut levels = Vec::new();
        let result = tree.visit_depth_first(|node| {
            levels.push(node.level());
            if node.is_hole() {
                return Control::Break(node.polygon().len());
            }
            Control::Continue
        });
        assert!(matches!(result, Control::Break(4)));
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn clear_keeps_root() {
        let mut tree = nested_tree();
        tree.clear();
        assert!(tree.is_empty());
        assert_fuzzy_eq!(tree.area(), 0.0);
        let idx = tree.add_child(PolyTree::<f64>::ROOT, square(0.0, 1.0));
        assert_eq!(idx, 1);
    }

    #[test]
    fn display_lists_structure() {
        let tree = nested_tree();
        let text = tree.to_string();
        let expected = "Polytree with 2 polygons\n\
                        +- Polygon (0) contains 1 nested path with 4 points\n\
                        \x20 +- Hole (1) contains 1 nested path with 4 points\n\
                        \x20   +- Polygon (2) with 4 points\n\
                        +- Polygon (0) with 4 points\n";
        assert_eq!(text, expected);
    }
}
