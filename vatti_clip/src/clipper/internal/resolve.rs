//! Resolution of output rings once the sweep is complete.
//!
//! Horizontal joins are linked first, then every ring is cleaned (collinear points, spikes, and
//! self intersects removed) and converted into a path. For tree output each ring is also assigned
//! the smallest ring that contains it.
use super::{
    active_edge::OutRecIdx,
    out_rec::{OutPt, OutPtIdx},
    sweep::SweepState,
};
use crate::{
    clipper::PolyTree,
    core::{
        math::{
            closest_pt_on_segment, cross_product, dot_product, is_collinear, segment_intersect_pt,
            segments_intersect, Vector2,
        },
        traits::Real,
    },
    path::{path_bounds, point_in_polygon, Path, Paths, PointInPolygon},
};
use static_aabb2d_index::AABB;

#[inline]
fn bounds_contain<T>(outer: &AABB<T>, inner: &AABB<T>) -> bool
where
    T: Real,
{
    outer.min_x <= inner.min_x
        && outer.min_y <= inner.min_y
        && outer.max_x >= inner.max_x
        && outer.max_y >= inner.max_y
}

/// Signed area of the triangle `pt1 -> pt2 -> pt3`, same orientation convention as
/// [crate::path::path_area].
#[inline]
fn triangle_area<T>(pt1: Vector2<T>, pt2: Vector2<T>, pt3: Vector2<T>) -> T
where
    T: Real,
{
    ((pt3.y + pt1.y) * (pt3.x - pt1.x)
        + (pt1.y + pt2.y) * (pt1.x - pt2.x)
        + (pt2.y + pt3.y) * (pt2.x - pt3.x))
        * T::half()
}

impl<T> SweepState<'_, T>
where
    T: Real,
{
    fn fix_outrec_pts(&mut self, outrec: OutRecIdx) {
        let Some(start) = self.outrecs[outrec].pts else {
            return;
        };
        let mut op = start;
        loop {
            self.out_pts[op].outrec = outrec;
            op = self.out_pts[op].next;
            if op == start {
                break;
            }
        }
    }

    /// Signed area of the ring containing `op`.
    pub(super) fn ring_area(&self, op: OutPtIdx) -> T {
        let mut area = T::zero();
        let mut op2 = op;
        loop {
            let OutPt { pt, prev, next, .. } = self.out_pts[op2];
            let prev_pt = self.out_pts[prev].pt;
            area = area + (prev_pt.y + pt.y) * (prev_pt.x - pt.x);
            op2 = next;
            if op2 == op {
                break;
            }
        }
        area * T::half()
    }

    fn ring_len(&self, op: OutPtIdx) -> usize {
        let mut count = 0;
        let mut op2 = op;
        loop {
            count += 1;
            op2 = self.out_pts[op2].next;
            if op2 == op {
                break;
            }
        }
        count
    }

    fn move_splits(&mut self, from: OutRecIdx, to: OutRecIdx) {
        let Some(splits) = self.outrecs[from].splits.take() else {
            return;
        };
        self.outrecs[to].splits.get_or_insert_with(Vec::new).extend(splits);
    }

    /// Link the ring pairs collected from overlapping horizontal segments.
    ///
    /// Linking two points of the same ring splits it in two, linking points of different rings
    /// merges them.
    pub(super) fn process_horz_joins(&mut self) {
        let joins = std::mem::take(&mut self.horz_joins);
        for j in joins {
            let (Some(or1), Some(mut or2)) = (
                self.get_real_outrec(Some(self.out_pts[j.op1].outrec)),
                self.get_real_outrec(Some(self.out_pts[j.op2].outrec)),
            ) else {
                continue;
            };

            let op1b = self.out_pts[j.op1].next;
            let op2b = self.out_pts[j.op2].prev;
            self.out_pts[j.op1].next = j.op2;
            self.out_pts[j.op2].prev = j.op1;
            self.out_pts[op1b].prev = op2b;
            self.out_pts[op2b].next = op1b;

            if or1 == or2 {
                or2 = self.new_outrec();
                self.outrecs[or2].pts = Some(op1b);
                self.fix_outrec_pts(or2);

                if let Some(pts) = self.outrecs[or1].pts {
                    if self.out_pts[pts].outrec == or2 {
                        self.outrecs[or1].pts = Some(j.op1);
                        self.out_pts[j.op1].outrec = or1;
                    }
                }

                if self.using_tree {
                    let (Some(pts1), Some(pts2)) = (self.outrecs[or1].pts, self.outrecs[or2].pts)
                    else {
                        continue;
                    };
                    if self.path1_inside_path2(pts1, pts2) {
                        self.outrecs[or1].pts = Some(pts2);
                        self.outrecs[or2].pts = Some(pts1);
                        self.fix_outrec_pts(or1);
                        self.fix_outrec_pts(or2);
                        self.outrecs[or2].owner = Some(or1);
                    } else if self.path1_inside_path2(pts2, pts1) {
                        self.outrecs[or2].owner = Some(or1);
                    } else {
                        self.outrecs[or2].owner = self.outrecs[or1].owner;
                    }

                    self.outrecs[or1]
                        .splits
                        .get_or_insert_with(Vec::new)
                        .push(or2);
                } else {
                    self.outrecs[or2].owner = Some(or1);
                }
            } else {
                self.outrecs[or2].pts = None;
                if self.using_tree {
                    self.set_owner(or2, or1);
                    self.move_splits(or2, or1);
                } else {
                    self.outrecs[or2].owner = Some(or1);
                }
            }
        }
    }

    #[inline]
    fn pts_really_close(&self, pt1: Vector2<T>, pt2: Vector2<T>) -> bool {
        (pt1.x - pt2.x).abs() < self.eps && (pt1.y - pt2.y).abs() < self.eps
    }

    fn is_very_small_triangle(&self, op: OutPtIdx) -> bool {
        let OutPt { pt, prev, next, .. } = self.out_pts[op];
        if self.out_pts[next].next != prev {
            return false;
        }
        let prev_pt = self.out_pts[prev].pt;
        let next_pt = self.out_pts[next].pt;
        self.pts_really_close(prev_pt, next_pt)
            || self.pts_really_close(pt, next_pt)
            || self.pts_really_close(pt, prev_pt)
    }

    fn is_valid_closed_path(&self, op: Option<OutPtIdx>) -> bool {
        match op {
            None => false,
            Some(op) => {
                let OutPt { prev, next, .. } = self.out_pts[op];
                next != op && (next != prev || !self.is_very_small_triangle(op))
            }
        }
    }

    /// Unlink `op` from its ring, returns the next point or `None` if the ring is now empty.
    fn dispose_out_pt(&mut self, op: OutPtIdx) -> Option<OutPtIdx> {
        let OutPt { prev, next, .. } = self.out_pts[op];
        self.out_pts[prev].next = next;
        self.out_pts[next].prev = prev;
        if next == op {
            None
        } else {
            Some(next)
        }
    }

    /// Remove duplicate points, spikes, and (unless collinear points are preserved) collinear
    /// points from a closed ring, then split off any self intersecting lobes.
    pub(super) fn clean_collinear(&mut self, outrec: OutRecIdx) {
        let Some(outrec) = self.get_real_outrec(Some(outrec)) else {
            return;
        };
        if self.outrecs[outrec].is_open {
            return;
        }

        if !self.is_valid_closed_path(self.outrecs[outrec].pts) {
            self.outrecs[outrec].pts = None;
            return;
        }

        let Some(mut start_op) = self.outrecs[outrec].pts else {
            return;
        };
        let mut op2 = start_op;
        loop {
            let OutPt { pt, prev, next, .. } = self.out_pts[op2];
            let prev_pt = self.out_pts[prev].pt;
            let next_pt = self.out_pts[next].pt;
            if is_collinear(prev_pt, pt, next_pt, self.eps)
                && (pt.fuzzy_eq_eps(prev_pt, self.eps)
                    || pt.fuzzy_eq_eps(next_pt, self.eps)
                    || !self.preserve_collinear
                    || dot_product(prev_pt, pt, next_pt) < T::zero())
            {
                if self.outrecs[outrec].pts == Some(op2) {
                    self.outrecs[outrec].pts = Some(prev);
                }

                let remaining = self.dispose_out_pt(op2);
                if !self.is_valid_closed_path(remaining) {
                    self.outrecs[outrec].pts = None;
                    return;
                }

                if let Some(r) = remaining {
                    op2 = r;
                    start_op = r;
                }
                continue;
            }

            op2 = next;
            if op2 == start_op {
                break;
            }
        }

        self.fix_self_intersects(outrec);
    }

    /// Split the ring at the crossing of the segments either side of `split_op`.
    ///
    /// The ring becomes two rings which meet at the intersect point: the small lobe
    /// `ip -> split_op -> split_op.next` and the rest of the ring. Each keeps its own orientation,
    /// and a ring is only kept if its absolute area is at least `min_split_area` (the rest of the
    /// ring is always kept unless it is a triangle).
    pub(super) fn do_split_op(&mut self, outrec: OutRecIdx, split_op: OutPtIdx) {
        let prev_op = self.out_pts[split_op].prev;
        let split_next = self.out_pts[split_op].next;
        let next_next_op = self.out_pts[split_next].next;
        self.outrecs[outrec].pts = Some(prev_op);

        let prev_pt = self.out_pts[prev_op].pt;
        let split_pt = self.out_pts[split_op].pt;
        let split_next_pt = self.out_pts[split_next].pt;
        let next_next_pt = self.out_pts[next_next_op].pt;
        let ip = segment_intersect_pt(prev_pt, split_pt, split_next_pt, next_next_pt)
            .unwrap_or(split_pt);

        let whole_area = self.ring_area(prev_op);
        let lobe_area = triangle_area(ip, split_pt, split_next_pt);
        let rest_area = whole_area - lobe_area;

        // relink the rest of the ring through the intersect point
        if ip.fuzzy_eq_eps(prev_pt, self.eps) || ip.fuzzy_eq_eps(next_next_pt, self.eps) {
            self.out_pts[next_next_op].prev = prev_op;
            self.out_pts[prev_op].next = next_next_op;
        } else {
            let new_op = self.new_out_pt(ip, outrec);
            self.out_pts[new_op].prev = prev_op;
            self.out_pts[new_op].next = next_next_op;
            self.out_pts[next_next_op].prev = new_op;
            self.out_pts[prev_op].next = new_op;
        }

        let rest_len = self.ring_len(prev_op);
        if rest_len < 3 || (rest_len == 3 && rest_area.abs() < self.min_split_area) {
            self.outrecs[outrec].pts = None;
        }

        if lobe_area.abs() < self.min_split_area {
            return;
        }

        let new_outrec = self.new_outrec();
        self.outrecs[new_outrec].owner = self.outrecs[outrec].owner;
        self.out_pts[split_op].outrec = new_outrec;
        self.out_pts[split_next].outrec = new_outrec;

        let new_op = self.new_out_pt(ip, new_outrec);
        self.out_pts[new_op].prev = split_next;
        self.out_pts[new_op].next = split_op;
        self.outrecs[new_outrec].pts = Some(new_op);
        self.out_pts[split_op].prev = new_op;
        self.out_pts[split_next].next = new_op;

        if !self.using_tree || self.outrecs[outrec].pts.is_none() {
            return;
        }

        if self.path1_inside_path2(prev_op, new_op) {
            self.outrecs[new_outrec]
                .splits
                .get_or_insert_with(Vec::new)
                .push(outrec);
        } else {
            self.outrecs[outrec]
                .splits
                .get_or_insert_with(Vec::new)
                .push(new_outrec);
        }
    }

    #[inline]
    fn is_triangle(&self, op: OutPtIdx) -> bool {
        let o = &self.out_pts[op];
        o.prev == self.out_pts[o.next].next
    }

    fn fix_self_intersects(&mut self, outrec: OutRecIdx) {
        let Some(mut op2) = self.outrecs[outrec].pts else {
            return;
        };
        if self.is_triangle(op2) {
            return;
        }

        loop {
            let OutPt { pt, prev, next, .. } = self.out_pts[op2];
            let next_next = self.out_pts[next].next;
            if segments_intersect(
                self.out_pts[prev].pt,
                pt,
                self.out_pts[next].pt,
                self.out_pts[next_next].pt,
                false,
            ) {
                self.do_split_op(outrec, op2);
                let Some(pts) = self.outrecs[outrec].pts else {
                    return;
                };
                op2 = pts;
                if self.is_triangle(op2) {
                    break;
                }
                continue;
            }

            op2 = next;
            if Some(op2) == self.outrecs[outrec].pts {
                break;
            }
        }
    }

    /// Build a path from the ring at `op`, returns `false` if the ring is degenerate.
    fn build_path(&self, op: Option<OutPtIdx>, is_open: bool, path: &mut Path<T>) -> bool {
        let Some(mut op) = op else {
            return false;
        };
        let o = &self.out_pts[op];
        if o.next == op || (!is_open && o.next == o.prev) {
            return false;
        }
        path.clear();

        let reverse = self.reverse_solution;
        let mut op2 = if reverse {
            o.prev
        } else {
            op = o.next;
            self.out_pts[op].next
        };
        let mut last_pt = self.out_pts[op].pt;
        path.push(last_pt);

        while op2 != op {
            let pt = self.out_pts[op2].pt;
            if !pt.fuzzy_eq_eps(last_pt, self.eps) {
                last_pt = pt;
                path.push(last_pt);
            }
            op2 = if reverse {
                self.out_pts[op2].prev
            } else {
                self.out_pts[op2].next
            };
        }

        path.len() != 3 || is_open || !self.is_very_small_triangle(op2)
    }

    /// Collect the flat output, returns `(closed, open)` paths.
    pub fn build_paths(&mut self) -> (Paths<T>, Paths<T>) {
        let mut closed = Vec::with_capacity(self.outrecs.len());
        let mut open = Vec::new();

        // outrecs may be appended while cleaning so the length is re-checked each iteration
        let mut i = 0;
        while i < self.outrecs.len() {
            let outrec = i;
            i += 1;
            if self.outrecs[outrec].pts.is_none() {
                continue;
            }

            let mut path = Path::new();
            if self.outrecs[outrec].is_open {
                if self.build_path(self.outrecs[outrec].pts, true, &mut path) {
                    open.push(path);
                }
            } else {
                self.clean_collinear(outrec);
                if self.build_path(self.outrecs[outrec].pts, false, &mut path) {
                    closed.push(path);
                }
            }
        }

        (closed, open)
    }

    /// Clean the ring and cache its path and bounds, returns `false` if the ring is degenerate.
    fn check_bounds(&mut self, outrec: OutRecIdx) -> bool {
        if self.outrecs[outrec].pts.is_none() {
            return false;
        }
        if self.outrecs[outrec].bounds.is_some() {
            return true;
        }

        self.clean_collinear(outrec);
        let mut path = Path::new();
        if !self.build_path(self.outrecs[outrec].pts, false, &mut path) {
            return false;
        }

        let o = &mut self.outrecs[outrec];
        o.bounds = path_bounds(&path);
        o.path = path;
        o.bounds.is_some()
    }

    fn check_split_owner(&mut self, outrec: OutRecIdx, splits: &[OutRecIdx]) -> bool {
        for &s in splits {
            if s == outrec {
                continue;
            }

            if self.outrecs[s].pts.is_none() {
                if let Some(sub_splits) = self.outrecs[s].splits.clone() {
                    if self.check_split_owner(outrec, &sub_splits) {
                        return true;
                    }
                }
            }

            let Some(split) = self.get_real_outrec(Some(s)) else {
                continue;
            };
            if split == outrec || self.outrecs[split].recursive_split == Some(outrec) {
                continue;
            }
            self.outrecs[split].recursive_split = Some(outrec);

            if let Some(sub_splits) = self.outrecs[split].splits.clone() {
                if self.check_split_owner(outrec, &sub_splits) {
                    return true;
                }
            }

            if !self.is_valid_owner(outrec, Some(split)) || !self.check_bounds(split) {
                continue;
            }

            let contains = match (&self.outrecs[split].bounds, &self.outrecs[outrec].bounds) {
                (Some(outer), Some(inner)) => bounds_contain(outer, inner),
                _ => false,
            };
            if !contains {
                continue;
            }

            let (Some(pts), Some(split_pts)) = (self.outrecs[outrec].pts, self.outrecs[split].pts)
            else {
                continue;
            };
            if !self.path1_inside_path2(pts, split_pts) {
                continue;
            }

            self.outrecs[outrec].owner = Some(split);
            return true;
        }

        false
    }

    fn owner_contains(&mut self, outrec: OutRecIdx, owner: OutRecIdx) -> bool {
        if self.outrecs[owner].pts.is_none() || !self.check_bounds(owner) {
            return false;
        }

        let (o, or) = (&self.outrecs[owner], &self.outrecs[outrec]);
        match (&o.bounds, &or.bounds, o.pts, or.pts) {
            (Some(outer), Some(inner), Some(owner_pts), Some(pts)) => {
                bounds_contain(outer, inner) && self.path1_inside_path2(pts, owner_pts)
            }
            _ => false,
        }
    }

    fn recursive_check_owners(&mut self, outrec: OutRecIdx, tree: &mut PolyTree<T>) {
        if self.outrecs[outrec].poly_node.is_some() || self.outrecs[outrec].bounds.is_none() {
            return;
        }

        while let Some(owner) = self.outrecs[outrec].owner {
            if let Some(splits) = self.outrecs[owner].splits.clone() {
                if self.check_split_owner(outrec, &splits) {
                    break;
                }
            }

            if self.owner_contains(outrec, owner) {
                break;
            }

            self.outrecs[outrec].owner = self.outrecs[owner].owner;
        }

        let parent = match self.outrecs[outrec].owner {
            Some(owner) => {
                if self.outrecs[owner].poly_node.is_none() {
                    self.recursive_check_owners(owner, tree);
                }
                // owner that could not be placed is treated as absent
                self.outrecs[owner].poly_node.unwrap_or(PolyTree::<T>::ROOT)
            }
            None => PolyTree::<T>::ROOT,
        };

        let path = std::mem::take(&mut self.outrecs[outrec].path);
        self.outrecs[outrec].poly_node = Some(tree.add_child(parent, path));
    }

    /// Build the nested output into `tree`, returns the open paths.
    pub fn build_tree(&mut self, tree: &mut PolyTree<T>) -> Paths<T> {
        tree.clear();
        let mut open = Vec::new();

        let mut i = 0;
        while i < self.outrecs.len() {
            let outrec = i;
            i += 1;
            if self.outrecs[outrec].pts.is_none() {
                continue;
            }

            if self.outrecs[outrec].is_open {
                let mut path = Path::new();
                if self.build_path(self.outrecs[outrec].pts, true, &mut path) {
                    open.push(path);
                }
                continue;
            }

            if self.check_bounds(outrec) {
                self.recursive_check_owners(outrec, tree);
            }
        }

        open
    }

    /// Test `pt` against the ring at `op` (even-odd).
    pub(super) fn point_in_op_polygon(&self, pt: Vector2<T>, op: OutPtIdx) -> PointInPolygon {
        let pts = &self.out_pts;
        if pts[op].next == op || pts[op].prev == pts[op].next {
            return PointInPolygon::Outside;
        }

        // start at a point off the horizontal line through pt
        let mut op = op;
        let start = op;
        loop {
            if pts[op].pt.y != pt.y {
                break;
            }
            op = pts[op].next;
            if op == start {
                break;
            }
        }
        if pts[op].pt.y == pt.y {
            return PointInPolygon::Outside;
        }

        let mut is_above = pts[op].pt.y < pt.y;
        let starting_above = is_above;
        let mut inside = false;

        let mut op2 = pts[op].next;
        while op2 != op {
            if is_above {
                while op2 != op && pts[op2].pt.y < pt.y {
                    op2 = pts[op2].next;
                }
            } else {
                while op2 != op && pts[op2].pt.y > pt.y {
                    op2 = pts[op2].next;
                }
            }
            if op2 == op {
                break;
            }

            let curr = pts[op2].pt;
            let prev = pts[pts[op2].prev].pt;
            if curr.y == pt.y {
                if curr.x == pt.x || (curr.y == prev.y && (pt.x < prev.x) != (pt.x < curr.x)) {
                    return PointInPolygon::On;
                }
                op2 = pts[op2].next;
                if op2 == op {
                    break;
                }
                continue;
            }

            if curr.x <= pt.x || prev.x <= pt.x {
                if prev.x < pt.x && curr.x < pt.x {
                    inside = !inside;
                } else {
                    let d = cross_product(prev, curr, pt);
                    if d == T::zero() {
                        return PointInPolygon::On;
                    }
                    if (d < T::zero()) == is_above {
                        inside = !inside;
                    }
                }
            }
            is_above = !is_above;
            op2 = pts[op2].next;
        }

        if is_above != starting_above {
            let d = cross_product(pts[pts[op2].prev].pt, pts[op2].pt, pt);
            if d == T::zero() {
                return PointInPolygon::On;
            }
            if (d < T::zero()) == is_above {
                inside = !inside;
            }
        }

        if inside {
            PointInPolygon::Inside
        } else {
            PointInPolygon::Outside
        }
    }

    /// Ring points with axis aligned collinear points removed.
    fn get_clean_path(&self, op: OutPtIdx) -> Path<T> {
        let pts = &self.out_pts;
        let axis_collinear = |a: Vector2<T>, b: Vector2<T>, c: Vector2<T>| {
            (b.x == a.x && b.x == c.x) || (b.y == a.y && b.y == c.y)
        };

        let mut op2 = op;
        while pts[op2].next != op
            && axis_collinear(
                pts[pts[op2].prev].pt,
                pts[op2].pt,
                pts[pts[op2].next].pt,
            )
        {
            op2 = pts[op2].next;
        }

        let mut result = vec![pts[op2].pt];
        let mut prev_op = op2;
        op2 = pts[op2].next;
        while op2 != op {
            if !axis_collinear(pts[prev_op].pt, pts[op2].pt, pts[pts[op2].next].pt) {
                result.push(pts[op2].pt);
                prev_op = op2;
            }
            op2 = pts[op2].next;
        }

        result
    }

    /// Returns `true` if the ring at `op1` lies inside the ring at `op2`.
    ///
    /// Ring vertexes are tested until two more lie on one side than the other. If that never
    /// happens (rings share most of their vertexes) the first edge midpoint of `op1` that is not on
    /// the boundary of `op2` decides, and when every edge runs along `op2` the centroid of `op1`
    /// is used.
    pub(super) fn path1_inside_path2(&self, op1: OutPtIdx, op2: OutPtIdx) -> bool {
        let mut outside_count: i32 = 0;
        let mut op = op1;
        loop {
            match self.point_in_op_polygon(self.out_pts[op].pt, op2) {
                PointInPolygon::Outside => outside_count += 1,
                PointInPolygon::Inside => outside_count -= 1,
                PointInPolygon::On => {}
            }
            op = self.out_pts[op].next;
            if op == op1 || outside_count.abs() >= 2 {
                break;
            }
        }

        if outside_count.abs() > 1 {
            return outside_count < 0;
        }

        let path1 = self.get_clean_path(op1);
        let path2 = self.get_clean_path(op2);
        let n = path1.len();
        for i in 0..n {
            let mid = (path1[i] + path1[(i + 1) % n]).scale(T::half());
            if self.near_path_boundary(mid, &path2) {
                continue;
            }
            return point_in_polygon(mid, &path2) == PointInPolygon::Inside;
        }

        match ring_centroid(&path1) {
            Some(c) => point_in_polygon(c, &path2) != PointInPolygon::Outside,
            None => false,
        }
    }

    /// Returns `true` if `pt` lies within `eps` of any edge of the closed `path`.
    fn near_path_boundary(&self, pt: Vector2<T>, path: &[Vector2<T>]) -> bool {
        let eps_sq = self.eps * self.eps;
        let n = path.len();
        (0..n).any(|i| {
            let closest = closest_pt_on_segment(pt, path[i], path[(i + 1) % n]);
            (closest - pt).length_squared() <= eps_sq
        })
    }
}

/// Area weighted centroid of a closed ring, `None` if the ring has no area.
fn ring_centroid<T>(path: &[Vector2<T>]) -> Option<Vector2<T>>
where
    T: Real,
{
    let n = path.len();
    let mut area2 = T::zero();
    let mut cx = T::zero();
    let mut cy = T::zero();
    for i in 0..n {
        let p = path[i];
        let q = path[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        area2 = area2 + cross;
        cx = cx + (p.x + q.x) * cross;
        cy = cy + (p.y + q.y) * cross;
    }

    if area2 == T::zero() {
        return None;
    }

    let denom = area2 * T::from(3.0).unwrap();
    Some(Vector2::new(cx / denom, cy / denom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipper::ClipperOptions,
        core::{math::vec2, traits::FuzzyEq},
        path::path_area,
    };

    /// Build a closed output ring directly from points.
    fn push_ring(state: &mut SweepState<'_, f64>, pts: &[Vector2<f64>]) -> OutRecIdx {
        let outrec = state.new_outrec();
        let first = state.out_pts.len();
        let n = pts.len();
        for (i, &pt) in pts.iter().enumerate() {
            state.out_pts.push(OutPt {
                pt,
                next: first + (i + 1) % n,
                prev: first + (i + n - 1) % n,
                outrec,
                anchors_horz: false,
            });
        }
        state.outrecs[outrec].pts = Some(first);
        outrec
    }

    #[test]
    fn ring_area_matches_path_area() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        let pts = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 5.0), vec2(0.0, 5.0)];
        let outrec = push_ring(&mut state, &pts);
        let op = state.outrecs[outrec].pts.unwrap();
        assert_fuzzy_eq!(state.ring_area(op), 50.0);
        assert_fuzzy_eq!(state.ring_area(op), path_area(&pts));
        assert_fuzzy_eq!(
            triangle_area(vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(0.0, 4.0)),
            8.0
        );
    }

    #[test]
    fn collinear_points_removed() {
        let pts = [
            vec2(0.0, 0.0),
            vec2(5.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ];

        let mut options = ClipperOptions::new();
        options.preserve_collinear = false;
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, open) = state.build_paths();
        assert!(open.is_empty());
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].len(), 4);
        assert_fuzzy_eq!(path_area(&closed[0]), 100.0);

        // collinear point kept, duplicate point still removed
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].len(), 5);
    }

    #[test]
    fn spike_removed_even_when_preserving_collinear() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(
            &mut state,
            &[
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(20.0, 0.0),
                vec2(10.0, 0.0),
                vec2(10.0, 10.0),
                vec2(0.0, 10.0),
            ],
        );
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 1);
        assert_fuzzy_eq!(path_area(&closed[0]), 100.0);
        assert!(closed[0].iter().all(|p| p.x <= 10.0));
    }

    #[test]
    fn degenerate_rings_dropped() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &[vec2(0.0, 0.0), vec2(10.0, 0.0)]);
        push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(5.0, 0.0), vec2(10.0, 0.0)],
        );
        let (closed, open) = state.build_paths();
        assert!(closed.is_empty());
        assert!(open.is_empty());
    }

    #[test]
    fn bowtie_split_into_two_rings() {
        let pts = [vec2(0.0, 0.0), vec2(10.0, 4.0), vec2(10.0, 0.0), vec2(0.0, 8.0)];
        let whole: f64 = path_area(&pts);
        assert_fuzzy_eq!(whole.abs(), 20.0);

        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 2);

        let mut areas: Vec<f64> = closed.iter().map(|p| path_area(p)).collect();
        areas.sort_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap());
        assert_fuzzy_eq!(areas[0].abs(), 20.0 / 3.0, 1e-8);
        assert_fuzzy_eq!(areas[1].abs(), 80.0 / 3.0, 1e-8);
        // lobes keep orientation so they wind in opposite directions
        assert!(areas[0].signum() != areas[1].signum());
        assert_fuzzy_eq!(areas[0] + areas[1], whole, 1e-8);

        // every point of both rings lies on the original outline or the crossing point
        let ip = vec2(20.0 / 3.0, 8.0 / 3.0);
        for path in &closed {
            assert_eq!(path.len(), 3);
            assert!(path.iter().any(|p| p.fuzzy_eq_eps(ip, 1e-8)));
        }
    }

    #[test]
    fn symmetric_bowtie_lobes_cancel() {
        let pts = [vec2(0.0, 0.0), vec2(10.0, 10.0), vec2(10.0, 0.0), vec2(0.0, 10.0)];
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 2);
        assert_fuzzy_eq!(path_area(&closed[0]).abs(), 25.0);
        assert_fuzzy_eq!(path_area(&closed[1]).abs(), 25.0);
        assert_fuzzy_eq!(paths_sum(&closed), 0.0);
    }

    fn paths_sum(paths: &[Path<f64>]) -> f64 {
        paths.iter().map(|p| path_area(p)).sum()
    }

    #[test]
    fn small_lobe_discarded() {
        // crossing lobe at the right end has area 5/9, below the default threshold
        let pts = [vec2(0.0, 0.0), vec2(10.0, 1.0), vec2(10.0, 0.0), vec2(0.0, 8.0)];
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].len(), 3);
        assert_fuzzy_eq!(path_area(&closed[0]), 320.0 / 9.0, 1e-8);

        // lobe kept once the threshold is lowered
        let mut options = ClipperOptions::new();
        options.min_split_area = 0.5;
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        push_ring(&mut state, &pts);
        let (closed, _) = state.build_paths();
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn point_in_ring() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        let outrec = push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)],
        );
        let op = state.outrecs[outrec].pts.unwrap();
        assert_eq!(
            state.point_in_op_polygon(vec2(5.0, 5.0), op),
            PointInPolygon::Inside
        );
        assert_eq!(
            state.point_in_op_polygon(vec2(-1.0, 5.0), op),
            PointInPolygon::Outside
        );
        assert_eq!(
            state.point_in_op_polygon(vec2(10.0, 5.0), op),
            PointInPolygon::On
        );
        assert_eq!(
            state.point_in_op_polygon(vec2(5.0, 0.0), op),
            PointInPolygon::On
        );

        let inner = push_ring(
            &mut state,
            &[vec2(2.0, 2.0), vec2(8.0, 2.0), vec2(8.0, 8.0), vec2(2.0, 8.0)],
        );
        let inner_op = state.outrecs[inner].pts.unwrap();
        assert!(state.path1_inside_path2(inner_op, op));
        assert!(!state.path1_inside_path2(op, inner_op));
    }

    #[test]
    fn touching_ring_outside_owner() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        // lower left triangle only touches the upper right one along the diagonal, the bounds
        // midpoint of either lies on that shared edge
        let lower = push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 10.0)],
        );
        let upper = push_ring(
            &mut state,
            &[vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)],
        );
        let lower_op = state.outrecs[lower].pts.unwrap();
        let upper_op = state.outrecs[upper].pts.unwrap();
        assert!(!state.path1_inside_path2(lower_op, upper_op));
        assert!(!state.path1_inside_path2(upper_op, lower_op));
    }

    #[test]
    fn touching_ring_inside_owner() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        let square = push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)],
        );
        let corner = push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(0.0, 10.0), vec2(10.0, 0.0)],
        );
        let square_op = state.outrecs[square].pts.unwrap();
        let corner_op = state.outrecs[corner].pts.unwrap();
        assert!(state.path1_inside_path2(corner_op, square_op));
        assert!(!state.path1_inside_path2(square_op, corner_op));
    }

    #[test]
    fn centroid_of_ring() {
        let c = ring_centroid(&[
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(4.0, 2.0),
            vec2(0.0, 2.0),
        ])
        .unwrap();
        assert_fuzzy_eq!(c, vec2(2.0, 1.0));
        assert!(ring_centroid(&[vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(2.0, 2.0)]).is_none());
    }

    #[test]
    fn nested_rings_build_tree() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        state.using_tree = true;
        let outer = push_ring(
            &mut state,
            &[vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)],
        );
        let hole = push_ring(
            &mut state,
            &[vec2(2.0, 2.0), vec2(2.0, 8.0), vec2(8.0, 8.0), vec2(8.0, 2.0)],
        );
        state.outrecs[hole].owner = Some(outer);

        let mut tree = PolyTree::new();
        let open = state.build_tree(&mut tree);
        assert!(open.is_empty());
        assert_eq!(tree.children(PolyTree::<f64>::ROOT).len(), 1);
        let outer_node = tree.children(PolyTree::<f64>::ROOT)[0];
        assert_eq!(tree.children(outer_node).len(), 1);
        let hole_node = tree.children(outer_node)[0];
        assert!(tree.node(hole_node).is_hole());
        assert_fuzzy_eq!(tree.area(), 64.0);
    }
}
