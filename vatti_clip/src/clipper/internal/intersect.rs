use super::{
    active_edge::{ActiveIdx, IntersectNode},
    sweep::SweepState,
};
use crate::{
    clipper::{ClipType, FillRule, PathType},
    core::{
        math::{closest_pt_on_segment, segment_intersect_pt, vec2, Vector2},
        traits::Real,
    },
};

impl<T> SweepState<'_, T>
where
    T: Real,
{
    /// Update the winding counts and output rings of two edges crossing at `pt`.
    pub(super) fn intersect_edges(&mut self, ae1: ActiveIdx, ae2: ActiveIdx, pt: Vector2<T>) {
        if self.has_open_paths && (self.is_open(ae1) || self.is_open(ae2)) {
            self.intersect_open_edge(ae1, ae2, pt);
            return;
        }

        if self.actives[ae1].is_joined() {
            self.split(ae1, pt);
        }
        if self.actives[ae2].is_joined() {
            self.split(ae2, pt);
        }

        let even_odd = self.fill_rule == FillRule::EvenOdd;
        let (wdx1, wdx2) = (self.actives[ae1].wind_dx, self.actives[ae2].wind_dx);
        if self.is_same_poly_type(ae1, ae2) {
            if even_odd {
                let wc1 = self.actives[ae1].wind_count;
                self.actives[ae1].wind_count = self.actives[ae2].wind_count;
                self.actives[ae2].wind_count = wc1;
            } else {
                let a1 = &mut self.actives[ae1];
                if a1.wind_count + wdx2 == 0 {
                    a1.wind_count = -a1.wind_count;
                } else {
                    a1.wind_count += wdx2;
                }
                let a2 = &mut self.actives[ae2];
                if a2.wind_count - wdx1 == 0 {
                    a2.wind_count = -a2.wind_count;
                } else {
                    a2.wind_count -= wdx1;
                }
            }
        } else {
            let toggle = |wc2: i32| if wc2 == 0 { 1 } else { 0 };
            let a1 = &mut self.actives[ae1];
            a1.wind_count2 = if even_odd {
                toggle(a1.wind_count2)
            } else {
                a1.wind_count2 + wdx2
            };
            let a2 = &mut self.actives[ae2];
            a2.wind_count2 = if even_odd {
                toggle(a2.wind_count2)
            } else {
                a2.wind_count2 - wdx1
            };
        }

        let (old_e1_wc, old_e2_wc) = {
            let (wc1, wc2) = (self.actives[ae1].wind_count, self.actives[ae2].wind_count);
            match self.fill_rule {
                FillRule::Positive => (wc1, wc2),
                FillRule::Negative => (-wc1, -wc2),
                _ => (wc1.abs(), wc2.abs()),
            }
        };

        let e1_wc_is_0_or_1 = old_e1_wc == 0 || old_e1_wc == 1;
        let e2_wc_is_0_or_1 = old_e2_wc == 0 || old_e2_wc == 1;
        let (hot1, hot2) = (self.is_hot(ae1), self.is_hot(ae2));
        if (!hot1 && !e1_wc_is_0_or_1) || (!hot2 && !e2_wc_is_0_or_1) {
            return;
        }

        if hot1 && hot2 {
            if !e1_wc_is_0_or_1
                || !e2_wc_is_0_or_1
                || (!self.is_same_poly_type(ae1, ae2) && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(ae1, ae2, pt);
            } else if self.is_front(ae1) || self.actives[ae1].outrec == self.actives[ae2].outrec {
                // split rings which only touch at a common vertex
                self.add_local_max_poly(ae1, ae2, pt);
                self.add_local_min_poly(ae1, ae2, pt, false);
            } else {
                self.add_out_pt(ae1, pt);
                self.add_out_pt(ae2, pt);
                self.swap_outrecs(ae1, ae2);
            }
        } else if hot1 {
            self.add_out_pt(ae1, pt);
            self.swap_outrecs(ae1, ae2);
        } else if hot2 {
            self.add_out_pt(ae2, pt);
            self.swap_outrecs(ae1, ae2);
        } else {
            // neither edge is hot
            let (e1_wc2, e2_wc2) = {
                let (wc1, wc2) = (self.actives[ae1].wind_count2, self.actives[ae2].wind_count2);
                match self.fill_rule {
                    FillRule::Positive => (wc1, wc2),
                    FillRule::Negative => (-wc1, -wc2),
                    _ => (wc1.abs(), wc2.abs()),
                }
            };

            if !self.is_same_poly_type(ae1, ae2) {
                self.add_local_min_poly(ae1, ae2, pt, false);
            } else if old_e1_wc == 1 && old_e2_wc == 1 {
                let start = match self.clip_type {
                    ClipType::Union => e1_wc2 <= 0 || e2_wc2 <= 0,
                    ClipType::Difference => {
                        let is_clip = self.poly_type(ae1) == PathType::Clip;
                        (is_clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (!is_clip && e1_wc2 <= 0 && e2_wc2 <= 0)
                    }
                    ClipType::Xor => true,
                    ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                    ClipType::NoClip => false,
                };

                if start {
                    self.add_local_min_poly(ae1, ae2, pt, false);
                }
            }
        }
    }

    /// Intersection where at least one of the edges belongs to an open path.
    fn intersect_open_edge(&mut self, mut ae1: ActiveIdx, mut ae2: ActiveIdx, pt: Vector2<T>) {
        if self.is_open(ae1) && self.is_open(ae2) {
            return;
        }

        // ae1 is the open edge from here on
        if self.is_open(ae2) {
            std::mem::swap(&mut ae1, &mut ae2);
        }

        if self.actives[ae2].is_joined() {
            self.split(ae2, pt);
        }

        if self.clip_type == ClipType::Union {
            if !self.is_hot(ae2) {
                return;
            }
        } else if self.poly_type(ae2) == PathType::Subject {
            return;
        }

        let wc = self.actives[ae2].wind_count;
        let closed_edge_toggles = match self.fill_rule {
            FillRule::Positive => wc == 1,
            FillRule::Negative => wc == -1,
            _ => wc.abs() == 1,
        };
        if !closed_edge_toggles {
            return;
        }

        // toggle contribution
        if self.is_hot(ae1) {
            self.add_out_pt(ae1, pt);
            self.detach_open_end(ae1);
            return;
        }

        let lm_vertex = &self.vertices[self.local_min(ae1).vertex];
        if pt.fuzzy_eq_eps(lm_vertex.pt, self.eps) && !lm_vertex.is_open_end() {
            // find the other side of the local minima and if it's hot join up with it
            if let Some(ae3) = self.find_edge_with_matching_loc_min(ae1) {
                if let Some(or) = self.actives[ae3].outrec {
                    self.actives[ae1].outrec = Some(or);
                    if self.actives[ae1].wind_dx > 0 {
                        self.set_sides(or, ae1, ae3);
                    } else {
                        self.set_sides(or, ae3, ae1);
                    }
                    return;
                }
            }
        }

        self.start_open_path(ae1, pt);
    }

    fn find_edge_with_matching_loc_min(&self, e: ActiveIdx) -> Option<ActiveIdx> {
        let local_min = self.actives[e].local_min;
        let bot = self.actives[e].bot;
        let mut result = self.actives[e].next_in_ael;
        while let Some(r) = result {
            if self.actives[r].local_min == local_min {
                return Some(r);
            }
            if !self.is_horizontal(r) && bot != self.actives[r].bot {
                break;
            }
            result = self.actives[r].next_in_ael;
        }

        result = self.actives[e].prev_in_ael;
        while let Some(r) = result {
            if self.actives[r].local_min == local_min {
                return Some(r);
            }
            if !self.is_horizontal(r) && bot != self.actives[r].bot {
                return None;
            }
            result = self.actives[r].prev_in_ael;
        }

        None
    }

    pub(super) fn do_intersections(&mut self, top_y: T) {
        if self.build_intersect_list(top_y) {
            self.process_intersect_list();
            self.intersect_list.clear();
        }
    }

    /// Copy the AEL into the SEL, setting each edge's X to its position at `top_y`.
    fn adjust_cur_x_and_copy_to_sel(&mut self, top_y: T) {
        self.sel_first = self.ael_first;
        let mut iter = self.ael_first;
        while let Some(ae) = iter {
            let prev = self.actives[ae].prev_in_ael;
            let next = self.actives[ae].next_in_ael;
            let cur_x = match prev {
                Some(p) if self.actives[ae].join_with == super::active_edge::JoinWith::Left => {
                    // this also avoids complications
                    self.actives[p].cur_x
                }
                _ => self.actives[ae].top_x(top_y),
            };
            let a = &mut self.actives[ae];
            a.prev_in_sel = prev;
            a.next_in_sel = next;
            a.jump = next;
            a.cur_x = cur_x;
            iter = next;
        }
    }

    /// Remove `ae` from the SEL, returns the edge which followed it.
    fn extract_from_sel(&mut self, ae: ActiveIdx) -> Option<ActiveIdx> {
        let res = self.actives[ae].next_in_sel;
        let prev = self.actives[ae].prev_in_sel;
        if let Some(r) = res {
            self.actives[r].prev_in_sel = prev;
        }
        if let Some(p) = prev {
            self.actives[p].next_in_sel = res;
        }
        res
    }

    fn insert1_before2_in_sel(&mut self, ae1: ActiveIdx, ae2: ActiveIdx) {
        let prev = self.actives[ae2].prev_in_sel;
        self.actives[ae1].prev_in_sel = prev;
        if let Some(p) = prev {
            self.actives[p].next_in_sel = Some(ae1);
        }
        self.actives[ae1].next_in_sel = Some(ae2);
        self.actives[ae2].prev_in_sel = Some(ae1);
    }

    /// Find all crossings between the current scanline and `top_y`.
    ///
    /// Edges are copied into the SEL and merge sorted by their X at `top_y`, every time an edge
    /// has to be moved left past other edges an intersect node is recorded for each edge passed.
    /// Returns `true` if any intersects were found.
    pub(super) fn build_intersect_list(&mut self, top_y: T) -> bool {
        match self.ael_first {
            Some(first) if self.actives[first].next_in_ael.is_some() => {}
            _ => return false,
        }

        self.adjust_cur_x_and_copy_to_sel(top_y);

        // merge sort the SEL, runs are delimited by 'jump' links
        let mut left = self.sel_first;
        while let Some(l) = left {
            if self.actives[l].jump.is_none() {
                break;
            }

            let mut prev_base: Option<ActiveIdx> = None;
            while let Some(mut curr_base) = left {
                if self.actives[curr_base].jump.is_none() {
                    break;
                }
                let mut right = self.actives[curr_base].jump;
                let mut l_end = right;
                let r_end = right.and_then(|r| self.actives[r].jump);
                self.actives[curr_base].jump = r_end;
                while left != l_end && right != r_end {
                    let (Some(l), Some(r)) = (left, right) else {
                        break;
                    };

                    if self.actives[r].cur_x < self.actives[l].cur_x {
                        let mut tmp = self.actives[r].prev_in_sel;
                        while let Some(t) = tmp {
                            self.add_new_intersect_node(t, r, top_y);
                            if t == l {
                                break;
                            }
                            tmp = self.actives[t].prev_in_sel;
                        }

                        right = self.extract_from_sel(r);
                        l_end = right;
                        self.insert1_before2_in_sel(r, l);
                        if l != curr_base {
                            continue;
                        }

                        curr_base = r;
                        self.actives[curr_base].jump = r_end;
                        match prev_base {
                            None => self.sel_first = Some(curr_base),
                            Some(pb) => self.actives[pb].jump = Some(curr_base),
                        }
                    } else {
                        left = self.actives[l].next_in_sel;
                    }
                }

                prev_base = Some(curr_base);
                left = r_end;
            }

            left = self.sel_first;
        }

        !self.intersect_list.is_empty()
    }

    fn add_new_intersect_node(&mut self, ae1: ActiveIdx, ae2: ActiveIdx, top_y: T) {
        let a1 = &self.actives[ae1];
        let a2 = &self.actives[ae2];
        let mut ip = segment_intersect_pt(a1.bot, a1.top, a2.bot, a2.top)
            .unwrap_or_else(|| vec2(a1.cur_x, top_y));

        // the intersect must lie within the scanbeam, nudge it back in when rounding put it
        // outside
        if ip.y > self.current_bot_y || ip.y < top_y {
            let abs_dx1 = a1.dx.abs();
            let abs_dx2 = a2.dx.abs();
            let steep = T::from(100.0).unwrap();
            match (abs_dx1 > steep, abs_dx2 > steep) {
                (true, true) => {
                    ip = if abs_dx1 > abs_dx2 {
                        closest_pt_on_segment(ip, a1.bot, a1.top)
                    } else {
                        closest_pt_on_segment(ip, a2.bot, a2.top)
                    };
                }
                (true, false) => ip = closest_pt_on_segment(ip, a1.bot, a1.top),
                (false, true) => ip = closest_pt_on_segment(ip, a2.bot, a2.top),
                (false, false) => {
                    ip.y = if ip.y < top_y {
                        top_y
                    } else {
                        self.current_bot_y
                    };
                    ip.x = if abs_dx1 < abs_dx2 {
                        a1.top_x(ip.y)
                    } else {
                        a2.top_x(ip.y)
                    };
                }
            }
        }

        self.intersect_list.push(IntersectNode {
            pt: ip,
            edge1: ae1,
            edge2: ae2,
        });
    }

    fn edges_adjacent_in_ael(&self, node: &IntersectNode<T>) -> bool {
        let e1 = &self.actives[node.edge1];
        e1.next_in_ael == Some(node.edge2) || e1.prev_in_ael == Some(node.edge2)
    }

    fn process_intersect_list(&mut self) {
        // process intersections from the bottom of the scanbeam up, with the proviso that only
        // edges adjacent in the AEL may be swapped
        self.intersect_list.sort_by(|a, b| a.process_order(b));

        for i in 0..self.intersect_list.len() {
            if !self.edges_adjacent_in_ael(&self.intersect_list[i]) {
                let mut j = i + 1;
                while j < self.intersect_list.len()
                    && !self.edges_adjacent_in_ael(&self.intersect_list[j])
                {
                    j += 1;
                }

                if j == self.intersect_list.len() {
                    self.succeeded = false;
                    return;
                }
                self.intersect_list.swap(i, j);
            }

            let node = self.intersect_list[i];
            self.intersect_edges(node.edge1, node.edge2, node.pt);
            self.swap_positions_in_ael(node.edge1, node.edge2);

            self.actives[node.edge1].cur_x = node.pt.x;
            self.actives[node.edge2].cur_x = node.pt.x;
            self.check_join_left(node.edge2, node.pt, true);
            self.check_join_right(node.edge1, node.pt, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipper::{internal::active_edge::Active, ClipperOptions},
        core::traits::FuzzyEq,
    };

    fn link_ael(state: &mut SweepState<'_, f64>, edges: &[ActiveIdx]) {
        for (i, &e) in edges.iter().enumerate() {
            state.actives[e].prev_in_ael = if i == 0 { None } else { Some(edges[i - 1]) };
            state.actives[e].next_in_ael = edges.get(i + 1).copied();
        }
        state.ael_first = edges.first().copied();
    }

    #[test]
    fn intersect_list_from_hand_built_ael() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        state.actives.push(Active::new(vec2(0.0, 10.0), vec2(12.0, 0.0), 1, 0, 0));
        state.actives.push(Active::new(vec2(4.0, 10.0), vec2(4.0, 0.0), 1, 0, 0));
        state.actives.push(Active::new(vec2(8.0, 10.0), vec2(0.0, 0.0), 1, 0, 0));
        link_ael(&mut state, &[0, 1, 2]);
        state.current_bot_y = 10.0;

        assert!(state.build_intersect_list(0.0));
        assert_eq!(state.intersect_list.len(), 3);

        // SEL is left sorted by X at the top of the scanbeam
        let mut sel = Vec::new();
        let mut iter = state.sel_first;
        while let Some(e) = iter {
            sel.push(e);
            iter = state.actives[e].next_in_sel;
        }
        assert_eq!(sel, vec![2, 1, 0]);

        state.intersect_list.sort_by(|a, b| a.process_order(b));
        let pts: Vec<_> = state.intersect_list.iter().map(|n| n.pt).collect();
        assert!(pts[0].fuzzy_eq(vec2(4.0, 10.0 - 10.0 / 3.0)));
        assert!(pts[1].fuzzy_eq(vec2(4.8, 6.0)));
        assert!(pts[2].fuzzy_eq(vec2(4.0, 5.0)));
    }

    #[test]
    fn no_intersects_when_order_kept() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        state.actives.push(Active::new(vec2(0.0, 10.0), vec2(1.0, 0.0), 1, 0, 0));
        state.actives.push(Active::new(vec2(4.0, 10.0), vec2(5.0, 0.0), 1, 0, 0));
        link_ael(&mut state, &[0, 1]);
        state.current_bot_y = 10.0;

        assert!(!state.build_intersect_list(0.0));
        assert_eq!(state.actives[0].cur_x, 1.0);
        assert_eq!(state.actives[1].cur_x, 5.0);
    }

    #[test]
    fn intersect_point_clamped_to_scanbeam() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        // edges whose crossing lies outside of the scanbeam
        state.actives.push(Active::new(vec2(0.0, 10.0), vec2(1.0, 0.0), 1, 0, 0));
        state.actives.push(Active::new(vec2(0.5, 10.0), vec2(0.9, 0.0), 1, 0, 0));
        state.current_bot_y = 5.0;
        state.add_new_intersect_node(0, 1, 0.0);
        let ip = state.intersect_list[0].pt;
        assert!(ip.y <= 5.0 && ip.y >= 0.0);
    }
}
