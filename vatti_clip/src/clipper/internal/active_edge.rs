use super::vertex_list::VertexIdx;
use crate::core::{math::Vector2, traits::Real};

pub type ActiveIdx = usize;
pub type OutRecIdx = usize;
/// Index into the sorted local minima slice.
pub type LocalMinIdx = usize;

/// Pending join state between two adjacent hot edges which touch along a collinear run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum JoinWith {
    #[default]
    None,
    Left,
    Right,
}

/// Edge currently crossing the sweep line.
///
/// Edges are linked into the active edge list (AEL, ordered by X) and reuse a second set of links
/// for the sorted edge list (SEL), a scratch list used while processing horizontals and building
/// intersections.
#[derive(Debug, Clone)]
pub struct Active<T> {
    pub bot: Vector2<T>,
    pub top: Vector2<T>,
    /// X at the current scanline.
    pub cur_x: T,
    /// Inverse slope (dx/dy), `±T::max_real()` for horizontal edges.
    pub dx: T,
    /// +1 if the edge follows the path forward, -1 if it follows it in reverse.
    pub wind_dx: i32,
    /// Winding count of the edge's own path type.
    pub wind_count: i32,
    /// Winding count of the opposite path type.
    pub wind_count2: i32,
    /// Output ring this edge is extending, `Some` iff the edge is hot.
    pub outrec: Option<OutRecIdx>,
    pub prev_in_ael: Option<ActiveIdx>,
    pub next_in_ael: Option<ActiveIdx>,
    pub prev_in_sel: Option<ActiveIdx>,
    pub next_in_sel: Option<ActiveIdx>,
    /// Merge sort run boundary used while building the intersect list.
    pub jump: Option<ActiveIdx>,
    pub vertex_top: VertexIdx,
    pub local_min: LocalMinIdx,
    pub is_left_bound: bool,
    pub join_with: JoinWith,
}

impl<T> Active<T>
where
    T: Real,
{
    pub fn new(
        bot: Vector2<T>,
        top: Vector2<T>,
        wind_dx: i32,
        vertex_top: VertexIdx,
        local_min: LocalMinIdx,
    ) -> Self {
        let mut result = Self {
            bot,
            top,
            cur_x: bot.x,
            dx: T::zero(),
            wind_dx,
            wind_count: 0,
            wind_count2: 0,
            outrec: None,
            prev_in_ael: None,
            next_in_ael: None,
            prev_in_sel: None,
            next_in_sel: None,
            jump: None,
            vertex_top,
            local_min,
            is_left_bound: false,
            join_with: JoinWith::None,
        };
        result.set_dx();
        result
    }

    #[inline]
    pub fn set_dx(&mut self) {
        self.dx = get_dx(self.bot, self.top);
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.top.y == self.bot.y
    }

    #[inline]
    pub fn is_heading_right_horz(&self) -> bool {
        self.dx == -T::max_real()
    }

    #[inline]
    pub fn is_heading_left_horz(&self) -> bool {
        self.dx == T::max_real()
    }

    #[inline]
    pub fn is_hot(&self) -> bool {
        self.outrec.is_some()
    }

    #[inline]
    pub fn is_joined(&self) -> bool {
        self.join_with != JoinWith::None
    }

    /// X position of the edge at `current_y`.
    #[inline]
    pub fn top_x(&self, current_y: T) -> T {
        if current_y == self.top.y || self.top.x == self.bot.x {
            self.top.x
        } else if current_y == self.bot.y {
            self.bot.x
        } else {
            self.bot.x + self.dx * (current_y - self.bot.y)
        }
    }
}

/// Inverse slope of the segment `pt1 -> pt2`, horizontals heading right (increasing X) return
/// `-T::max_real()` and horizontals heading left return `T::max_real()`.
#[inline]
pub fn get_dx<T>(pt1: Vector2<T>, pt2: Vector2<T>) -> T
where
    T: Real,
{
    let dy = pt2.y - pt1.y;
    if dy != T::zero() {
        (pt2.x - pt1.x) / dy
    } else if pt2.x > pt1.x {
        -T::max_real()
    } else {
        T::max_real()
    }
}

/// Crossing of two active edges within the current scanbeam.
#[derive(Debug, Copy, Clone)]
pub struct IntersectNode<T> {
    pub pt: Vector2<T>,
    pub edge1: ActiveIdx,
    pub edge2: ActiveIdx,
}

impl<T> IntersectNode<T>
where
    T: Real,
{
    /// Ordering used to process intersects: top of the scanbeam last (descending Y), then
    /// ascending X.
    pub fn process_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .pt
            .y
            .cmp_real(&self.pt.y)
            .then_with(|| self.pt.x.cmp_real(&other.pt.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn dx_of_horizontals() {
        assert_eq!(get_dx(vec2(0.0, 1.0), vec2(5.0, 1.0)), -f64::MAX);
        assert_eq!(get_dx(vec2(5.0, 1.0), vec2(0.0, 1.0)), f64::MAX);
        assert_eq!(get_dx(vec2(0.0, 0.0), vec2(4.0, -2.0)), -2.0);
    }

    #[test]
    fn top_x_along_edge() {
        let e = Active::new(vec2(0.0, 10.0), vec2(10.0, 0.0), 1, 0, 0);
        assert_eq!(e.top_x(10.0), 0.0);
        assert_eq!(e.top_x(0.0), 10.0);
        assert_eq!(e.top_x(5.0), 5.0);
        assert!(!e.is_horizontal());

        let h = Active::new(vec2(0.0, 3.0), vec2(6.0, 3.0), -1, 0, 0);
        assert!(h.is_horizontal());
        assert!(h.is_heading_right_horz());
        assert_eq!(h.top_x(3.0), 6.0);
    }

    #[test]
    fn intersect_node_order() {
        let a = IntersectNode {
            pt: vec2(5.0, 2.0),
            edge1: 0,
            edge2: 1,
        };
        let b = IntersectNode {
            pt: vec2(1.0, 1.0),
            edge1: 2,
            edge2: 3,
        };
        let c = IntersectNode {
            pt: vec2(0.0, 2.0),
            edge1: 4,
            edge2: 5,
        };
        let mut nodes = vec![b, a, c];
        nodes.sort_by(|x, y| x.process_order(y));
        assert_eq!(nodes[0].edge1, 4);
        assert_eq!(nodes[1].edge1, 0);
        assert_eq!(nodes[2].edge1, 2);
    }
}
