use super::{
    active_edge::ActiveIdx,
    out_rec::{HorzJoin, HorzSegment, OutPtIdx},
    sweep::SweepState,
    vertex_list::{VertexFlags, VertexIdx},
};
use crate::core::{math::vec2, traits::Real};
use std::cmp::Ordering;

impl<T> SweepState<'_, T>
where
    T: Real,
{
    /// Last vertex of the run of vertexes at the edge's top Y, `None` unless that vertex is a
    /// maxima.
    fn get_curr_y_maxima_vertex(&self, ae: ActiveIdx, is_open: bool) -> Option<VertexIdx> {
        let a = &self.actives[ae];
        let mut result = a.vertex_top;
        let stop_flags = VertexFlags::OPEN_END | VertexFlags::LOCAL_MAX;
        loop {
            let v = &self.vertices[result];
            if is_open && v.flags.intersects(stop_flags) {
                break;
            }
            let next = if a.wind_dx > 0 { v.next } else { v.prev };
            if next == a.vertex_top || self.vertices[next].pt.y != v.pt.y {
                break;
            }
            result = next;
        }

        if self.vertices[result].is_maxima() {
            Some(result)
        } else {
            None
        }
    }

    /// Returns the direction of travel and the X extent of the horizontal edge.
    fn reset_horz_direction(&self, horz: ActiveIdx, vertex_max: Option<VertexIdx>) -> (bool, T, T) {
        let h = &self.actives[horz];
        if h.bot.x == h.top.x {
            // the horizontal edge is going nowhere
            let mut ae = h.next_in_ael;
            while let Some(e) = ae {
                if Some(self.actives[e].vertex_top) == vertex_max {
                    break;
                }
                ae = self.actives[e].next_in_ael;
            }
            return (ae.is_some(), h.cur_x, h.cur_x);
        }

        if h.cur_x < h.top.x {
            (true, h.cur_x, h.top.x)
        } else {
            (false, h.top.x, h.cur_x)
        }
    }

    /// Extend a horizontal edge over consecutive horizontal vertexes.
    ///
    /// If collinear points are preserved the extension stops where the horizontal doubles back on
    /// itself.
    pub(super) fn trim_horz(&mut self, horz: ActiveIdx) {
        let mut was_trimmed = false;
        let mut next = self.next_vertex(horz);
        let mut pt = self.vertices[next].pt;
        while pt.y == self.actives[horz].top.y {
            let h = &self.actives[horz];
            if self.preserve_collinear && (pt.x < h.top.x) != (h.bot.x < h.top.x) {
                break;
            }

            let h = &mut self.actives[horz];
            h.vertex_top = next;
            h.top = pt;
            was_trimmed = true;
            if self.is_maxima(horz) {
                break;
            }
            next = self.next_vertex(horz);
            pt = self.vertices[next].pt;
        }

        if was_trimmed {
            self.actives[horz].set_dx();
        }
    }

    /// Output point at the end of the ring which `hot_edge` is extending.
    fn get_last_op(&self, hot_edge: ActiveIdx) -> Option<OutPtIdx> {
        let or = self.actives[hot_edge].outrec?;
        let pts = self.outrecs[or].pts?;
        if self.outrecs[or].front_edge == Some(hot_edge) {
            Some(pts)
        } else {
            Some(self.out_pts[pts].next)
        }
    }

    fn add_to_horz_seg_list(&mut self, op: OutPtIdx) {
        if self.outrecs[self.out_pts[op].outrec].is_open {
            return;
        }
        self.horz_segs.push(HorzSegment::new(op));
    }

    /// Process a horizontal edge against every edge it overlaps on the current scanline.
    ///
    /// Horizontals are processed eagerly, crossing each edge in their path (as if they had a tiny
    /// slope) until reaching their maxima pair or the end of their run of horizontal vertexes.
    pub(super) fn do_horizontal(&mut self, horz: ActiveIdx) {
        let horz_is_open = self.is_open(horz);
        let y = self.actives[horz].bot.y;
        let vertex_max = self.get_curr_y_maxima_vertex(horz, horz_is_open);

        if vertex_max.is_some()
            && !horz_is_open
            && vertex_max != Some(self.actives[horz].vertex_top)
        {
            self.trim_horz(horz);
        }

        let (mut is_left_to_right, mut left_x, mut right_x) =
            self.reset_horz_direction(horz, vertex_max);

        if self.is_hot(horz) {
            let pt = vec2(self.actives[horz].cur_x, y);
            if let Some(op) = self.add_out_pt(horz, pt) {
                self.add_to_horz_seg_list(op);
            }
        }

        loop {
            // loops through consecutive horizontal edges (if open)
            let mut ae = if is_left_to_right {
                self.actives[horz].next_in_ael
            } else {
                self.actives[horz].prev_in_ael
            };

            while let Some(e) = ae {
                if Some(self.actives[e].vertex_top) == vertex_max {
                    // found the maxima pair, joined edges must be split first
                    if self.is_hot(horz) && self.actives[e].is_joined() {
                        let top = self.actives[e].top;
                        self.split(e, top);
                    }

                    if self.is_hot(horz) {
                        while Some(self.actives[horz].vertex_top) != vertex_max {
                            let top = self.actives[horz].top;
                            self.add_out_pt(horz, top);
                            self.update_edge_into_ael(horz);
                            if !self.succeeded {
                                return;
                            }
                        }

                        let top = self.actives[horz].top;
                        if is_left_to_right {
                            self.add_local_max_poly(horz, e, top);
                        } else {
                            self.add_local_max_poly(e, horz, top);
                        }
                    }

                    self.delete_from_ael(e);
                    self.delete_from_ael(horz);
                    return;
                }

                // if the horizontal is a maxima keep going until its maxima pair is reached,
                // otherwise check for break conditions
                if vertex_max != Some(self.actives[horz].vertex_top) || self.is_open_end(horz) {
                    // stop when 'e' is beyond the end of the horizontal line
                    let cur_x = self.actives[e].cur_x;
                    if (is_left_to_right && cur_x > right_x) || (!is_left_to_right && cur_x < left_x)
                    {
                        break;
                    }

                    if cur_x == self.actives[horz].top.x && !self.is_horizontal(e) {
                        let pt = self.vertices[self.next_vertex(horz)].pt;
                        let e_x = self.actives[e].top_x(pt.y);
                        let past_end = if self.is_open(e)
                            && !self.is_same_poly_type(e, horz)
                            && !self.is_hot(e)
                        {
                            // only break if it's past the horizontal's end to maximize the
                            // possibility of putting open edges into the solution
                            (is_left_to_right && e_x > pt.x) || (!is_left_to_right && e_x < pt.x)
                        } else {
                            (is_left_to_right && e_x >= pt.x) || (!is_left_to_right && e_x <= pt.x)
                        };

                        if past_end {
                            break;
                        }
                    }
                }

                let pt = vec2(self.actives[e].cur_x, y);
                if is_left_to_right {
                    self.intersect_edges(horz, e, pt);
                    self.swap_positions_in_ael(horz, e);
                    self.check_join_left(e, pt, false);
                    self.actives[horz].cur_x = self.actives[e].cur_x;
                    ae = self.actives[horz].next_in_ael;
                } else {
                    self.intersect_edges(e, horz, pt);
                    self.swap_positions_in_ael(e, horz);
                    self.check_join_right(e, pt, false);
                    self.actives[horz].cur_x = self.actives[e].cur_x;
                    ae = self.actives[horz].prev_in_ael;
                }

                if self.is_hot(horz) {
                    if let Some(op) = self.get_last_op(horz) {
                        self.add_to_horz_seg_list(op);
                    }
                }
            }

            // check if we've finished looping through consecutive horizontals
            if horz_is_open && self.is_open_end(horz) {
                if self.is_hot(horz) {
                    let top = self.actives[horz].top;
                    self.add_out_pt(horz, top);
                    self.detach_open_end(horz);
                }
                self.delete_from_ael(horz);
                return;
            }

            if self.vertices[self.next_vertex(horz)].pt.y != self.actives[horz].top.y {
                break;
            }

            // still more horizontals in bound to process
            if self.is_hot(horz) {
                let top = self.actives[horz].top;
                self.add_out_pt(horz, top);
            }
            self.update_edge_into_ael(horz);
            (is_left_to_right, left_x, right_x) = self.reset_horz_direction(horz, vertex_max);
        }

        if self.is_hot(horz) {
            let top = self.actives[horz].top;
            if let Some(op) = self.add_out_pt(horz, top) {
                self.add_to_horz_seg_list(op);
            }
        }

        // end of an intermediate horizontal
        self.update_edge_into_ael(horz);
    }

    /// Extend the segment's left op over its run of output points at the same Y, returns `false`
    /// if the run is degenerate or already anchors another segment.
    fn update_horz_segment(&mut self, hs_idx: usize) -> bool {
        let op = self.horz_segs[hs_idx].left_op;
        let Some(outrec) = self.get_real_outrec(Some(self.out_pts[op].outrec)) else {
            self.horz_segs[hs_idx].right_op = None;
            return false;
        };
        let Some(op_a) = self.outrecs[outrec].pts else {
            self.horz_segs[hs_idx].right_op = None;
            return false;
        };

        let pts = &self.out_pts;
        let curr_y = pts[op].pt.y;
        let mut op_p = op;
        let mut op_n = op;
        if self.outrecs[outrec].front_edge.is_some() {
            let op_z = pts[op_a].next;
            while op_p != op_z && pts[pts[op_p].prev].pt.y == curr_y {
                op_p = pts[op_p].prev;
            }
            while op_n != op_a && pts[pts[op_n].next].pt.y == curr_y {
                op_n = pts[op_n].next;
            }
        } else {
            while pts[op_p].prev != op_n && pts[pts[op_p].prev].pt.y == curr_y {
                op_p = pts[op_p].prev;
            }
            while pts[op_n].next != op_p && pts[pts[op_n].next].pt.y == curr_y {
                op_n = pts[op_n].next;
            }
        }

        let (x_p, x_n) = (pts[op_p].pt.x, pts[op_n].pt.x);
        let hs = &mut self.horz_segs[hs_idx];
        if x_p == x_n {
            hs.right_op = None;
            return false;
        }

        if x_p < x_n {
            hs.left_op = op_p;
            hs.right_op = Some(op_n);
            hs.left_to_right = true;
        } else {
            hs.left_op = op_n;
            hs.right_op = Some(op_p);
            hs.left_to_right = false;
        }

        if self.out_pts[hs.left_op].anchors_horz {
            hs.right_op = None;
            return false;
        }

        self.out_pts[hs.left_op].anchors_horz = true;
        true
    }

    /// Insert a copy of `op` into its ring next to `op`.
    fn duplicate_op(&mut self, op: OutPtIdx, insert_after: bool) -> OutPtIdx {
        let result = self.new_out_pt(self.out_pts[op].pt, self.out_pts[op].outrec);
        if insert_after {
            let next = self.out_pts[op].next;
            self.out_pts[result].next = next;
            self.out_pts[next].prev = result;
            self.out_pts[result].prev = op;
            self.out_pts[op].next = result;
        } else {
            let prev = self.out_pts[op].prev;
            self.out_pts[result].prev = prev;
            self.out_pts[prev].next = result;
            self.out_pts[result].next = op;
            self.out_pts[op].prev = result;
        }
        result
    }

    /// Pair up overlapping horizontal segments heading in opposite directions, each pair becomes
    /// a [HorzJoin] which links the two rings once the sweep is complete.
    pub(super) fn convert_horz_segs_to_joins(&mut self) {
        let mut k = 0;
        for i in 0..self.horz_segs.len() {
            if self.update_horz_segment(i) {
                k += 1;
            }
        }
        if k < 2 {
            return;
        }

        let out_pts = &self.out_pts;
        self.horz_segs.sort_by(|hs1, hs2| match (hs1.right_op, hs2.right_op) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(_), Some(_)) => out_pts[hs1.left_op]
                .pt
                .x
                .cmp_real(&out_pts[hs2.left_op].pt.x),
        });

        for i in 0..k - 1 {
            for j in i + 1..k {
                let (hs1, hs2) = (self.horz_segs[i], self.horz_segs[j]);
                let (Some(r1), Some(r2)) = (hs1.right_op, hs2.right_op) else {
                    continue;
                };

                let pts = &self.out_pts;
                if pts[hs2.left_op].pt.x >= pts[r1].pt.x
                    || hs2.left_to_right == hs1.left_to_right
                    || pts[r2].pt.x <= pts[hs1.left_op].pt.x
                {
                    continue;
                }

                let curr_y = pts[hs1.left_op].pt.y;
                let mut l1 = hs1.left_op;
                let mut l2 = hs2.left_op;
                let join = if hs1.left_to_right {
                    while pts[pts[l1].next].pt.y == curr_y && pts[pts[l1].next].pt.x <= pts[l2].pt.x
                    {
                        l1 = pts[l1].next;
                    }
                    while pts[pts[l2].prev].pt.y == curr_y && pts[pts[l2].prev].pt.x <= pts[l1].pt.x
                    {
                        l2 = pts[l2].prev;
                    }
                    self.horz_segs[i].left_op = l1;
                    self.horz_segs[j].left_op = l2;
                    HorzJoin {
                        op1: self.duplicate_op(l1, true),
                        op2: self.duplicate_op(l2, false),
                    }
                } else {
                    while pts[pts[l1].prev].pt.y == curr_y && pts[pts[l1].prev].pt.x <= pts[l2].pt.x
                    {
                        l1 = pts[l1].prev;
                    }
                    while pts[pts[l2].next].pt.y == curr_y && pts[pts[l2].next].pt.x <= pts[l1].pt.x
                    {
                        l2 = pts[l2].next;
                    }
                    self.horz_segs[i].left_op = l1;
                    self.horz_segs[j].left_op = l2;
                    HorzJoin {
                        op1: self.duplicate_op(l2, true),
                        op2: self.duplicate_op(l1, false),
                    }
                };

                self.horz_joins.push(join);
            }
        }
    }
}
