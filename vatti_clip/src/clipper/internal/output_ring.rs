//! Construction of output rings while the sweep is running.
//!
//! Each hot edge pair owns an [OutRec] whose points form a circular list. The front edge of an
//! outrec adds points at `pts` and the back edge adds points at `pts.next`, so the ring can grow
//! from both ends until the two edges meet at a local maxima.
use super::{
    active_edge::{ActiveIdx, JoinWith, OutRecIdx},
    out_rec::{OutPt, OutPtIdx, OutRec},
    sweep::SweepState,
};
use crate::core::{
    math::{is_collinear, perpendicular_dist_sq, Vector2},
    traits::Real,
};

impl<T> SweepState<'_, T>
where
    T: Real,
{
    pub(super) fn new_outrec(&mut self) -> OutRecIdx {
        self.outrecs.push(OutRec::new());
        self.outrecs.len() - 1
    }

    /// Create a new single point ring owned by `outrec`.
    pub(super) fn new_out_pt(&mut self, pt: Vector2<T>, outrec: OutRecIdx) -> OutPtIdx {
        let idx = self.out_pts.len();
        self.out_pts.push(OutPt {
            pt,
            next: idx,
            prev: idx,
            outrec,
            anchors_horz: false,
        });
        idx
    }

    #[inline]
    pub(super) fn is_front(&self, ae: ActiveIdx) -> bool {
        self.actives[ae]
            .outrec
            .is_some_and(|or| self.outrecs[or].front_edge == Some(ae))
    }

    #[inline]
    pub(super) fn set_sides(&mut self, outrec: OutRecIdx, start_edge: ActiveIdx, end_edge: ActiveIdx) {
        self.outrecs[outrec].front_edge = Some(start_edge);
        self.outrecs[outrec].back_edge = Some(end_edge);
    }

    pub(super) fn swap_outrecs(&mut self, ae1: ActiveIdx, ae2: ActiveIdx) {
        let or1 = self.actives[ae1].outrec;
        let or2 = self.actives[ae2].outrec;
        if or1 == or2 {
            if let Some(or) = or1 {
                let o = &mut self.outrecs[or];
                std::mem::swap(&mut o.front_edge, &mut o.back_edge);
            }
            return;
        }

        if let Some(or) = or1 {
            if self.outrecs[or].front_edge == Some(ae1) {
                self.outrecs[or].front_edge = Some(ae2);
            } else {
                self.outrecs[or].back_edge = Some(ae2);
            }
        }

        if let Some(or) = or2 {
            if self.outrecs[or].front_edge == Some(ae2) {
                self.outrecs[or].front_edge = Some(ae1);
            } else {
                self.outrecs[or].back_edge = Some(ae1);
            }
        }

        self.actives[ae1].outrec = or2;
        self.actives[ae2].outrec = or1;
    }

    /// Set `new_owner` as owner of `outrec` without creating an ownership cycle.
    pub(super) fn set_owner(&mut self, outrec: OutRecIdx, new_owner: OutRecIdx) {
        // skip dead owners
        while let Some(o) = self.outrecs[new_owner].owner {
            if self.outrecs[o].pts.is_some() {
                break;
            }
            self.outrecs[new_owner].owner = self.outrecs[o].owner;
        }

        // make sure that outrec isn't an owner of new_owner
        let mut tmp = Some(new_owner);
        while let Some(t) = tmp {
            if t == outrec {
                break;
            }
            tmp = self.outrecs[t].owner;
        }

        if tmp.is_some() {
            self.outrecs[new_owner].owner = self.outrecs[outrec].owner;
        }
        self.outrecs[outrec].owner = Some(new_owner);
    }

    /// Walk up the owner chain of `outrec` to the first outrec which still has points.
    pub(super) fn get_real_outrec(&self, mut outrec: Option<OutRecIdx>) -> Option<OutRecIdx> {
        while let Some(or) = outrec {
            if self.outrecs[or].pts.is_some() {
                return Some(or);
            }
            outrec = self.outrecs[or].owner;
        }
        None
    }

    /// Returns `true` if `outrec` does not appear in the owner chain of `test_owner`.
    pub(super) fn is_valid_owner(&self, outrec: OutRecIdx, mut test_owner: Option<OutRecIdx>) -> bool {
        while let Some(t) = test_owner {
            if t == outrec {
                return false;
            }
            test_owner = self.outrecs[t].owner;
        }
        true
    }

    fn uncouple_outrec(&mut self, ae: ActiveIdx) {
        let Some(or) = self.actives[ae].outrec else {
            return;
        };

        if let Some(fe) = self.outrecs[or].front_edge.take() {
            self.actives[fe].outrec = None;
        }
        if let Some(be) = self.outrecs[or].back_edge.take() {
            self.actives[be].outrec = None;
        }
    }

    fn swap_front_back_sides(&mut self, outrec: OutRecIdx) {
        let o = &mut self.outrecs[outrec];
        std::mem::swap(&mut o.front_edge, &mut o.back_edge);
        if let Some(pts) = o.pts {
            o.pts = Some(self.out_pts[pts].next);
        }
    }

    /// Start a new output ring at `pt` shared by `ae1` and `ae2`.
    pub(super) fn add_local_min_poly(
        &mut self,
        ae1: ActiveIdx,
        ae2: ActiveIdx,
        pt: Vector2<T>,
        is_new: bool,
    ) -> OutPtIdx {
        let outrec = self.new_outrec();
        self.actives[ae1].outrec = Some(outrec);
        self.actives[ae2].outrec = Some(outrec);

        if self.is_open(ae1) {
            self.outrecs[outrec].is_open = true;
            if self.actives[ae1].wind_dx > 0 {
                self.set_sides(outrec, ae1, ae2);
            } else {
                self.set_sides(outrec, ae2, ae1);
            }
        } else {
            match self.get_prev_hot_edge(ae1) {
                Some(prev_hot) => {
                    let prev_outrec = self.actives[prev_hot].outrec;
                    if let Some(prev_or) = prev_outrec {
                        if self.using_tree {
                            self.set_owner(outrec, prev_or);
                        }
                    }
                    self.outrecs[outrec].owner = prev_outrec;
                    if self.is_front(prev_hot) == is_new {
                        self.set_sides(outrec, ae2, ae1);
                    } else {
                        self.set_sides(outrec, ae1, ae2);
                    }
                }
                None => {
                    if is_new {
                        self.set_sides(outrec, ae1, ae2);
                    } else {
                        self.set_sides(outrec, ae2, ae1);
                    }
                }
            }
        }

        let op = self.new_out_pt(pt, outrec);
        self.outrecs[outrec].pts = Some(op);
        op
    }

    /// Close (or join) the output rings of `ae1` and `ae2` which meet at `pt`.
    pub(super) fn add_local_max_poly(
        &mut self,
        ae1: ActiveIdx,
        ae2: ActiveIdx,
        pt: Vector2<T>,
    ) -> Option<OutPtIdx> {
        if self.actives[ae1].is_joined() {
            self.split(ae1, pt);
        }
        if self.actives[ae2].is_joined() {
            self.split(ae2, pt);
        }

        let (Some(or1), Some(or2)) = (self.actives[ae1].outrec, self.actives[ae2].outrec) else {
            self.succeeded = false;
            return None;
        };

        if self.is_front(ae1) == self.is_front(ae2) {
            if self.is_open_end(ae1) {
                self.swap_front_back_sides(or1);
            } else if self.is_open_end(ae2) {
                self.swap_front_back_sides(or2);
            } else {
                self.succeeded = false;
                return None;
            }
        }

        let result = self.add_out_pt(ae1, pt)?;
        if or1 == or2 {
            self.outrecs[or1].pts = Some(result);
            if self.using_tree {
                match self.get_prev_hot_edge(ae1).and_then(|e| self.actives[e].outrec) {
                    Some(owner) => self.set_owner(or1, owner),
                    None => self.outrecs[or1].owner = None,
                }
            }
            self.uncouple_outrec(ae1);
        } else if self.is_open(ae1) {
            // preserve the winding orientation of the open path
            if self.actives[ae1].wind_dx < 0 {
                self.join_outrec_paths(ae1, ae2);
            } else {
                self.join_outrec_paths(ae2, ae1);
            }
        } else if or1 < or2 {
            self.join_outrec_paths(ae1, ae2);
        } else {
            self.join_outrec_paths(ae2, ae1);
        }

        Some(result)
    }

    /// Append the ring of `ae2` onto the ring of `ae1`, the outrec of `ae2` is left as a dead
    /// stub owned by the outrec of `ae1`.
    fn join_outrec_paths(&mut self, ae1: ActiveIdx, ae2: ActiveIdx) {
        let (Some(or1), Some(or2)) = (self.actives[ae1].outrec, self.actives[ae2].outrec) else {
            self.succeeded = false;
            return;
        };
        let (Some(p1_start), Some(p2_start)) = (self.outrecs[or1].pts, self.outrecs[or2].pts) else {
            self.succeeded = false;
            return;
        };

        let p1_end = self.out_pts[p1_start].next;
        let p2_end = self.out_pts[p2_start].next;
        if self.is_front(ae1) {
            self.out_pts[p2_end].prev = p1_start;
            self.out_pts[p1_start].next = p2_end;
            self.out_pts[p2_start].next = p1_end;
            self.out_pts[p1_end].prev = p2_start;
            self.outrecs[or1].pts = Some(p2_start);
            let front = self.outrecs[or2].front_edge;
            self.outrecs[or1].front_edge = front;
            if let Some(fe) = front {
                self.actives[fe].outrec = Some(or1);
            }
        } else {
            self.out_pts[p1_end].prev = p2_start;
            self.out_pts[p2_start].next = p1_end;
            self.out_pts[p1_start].next = p2_end;
            self.out_pts[p2_end].prev = p1_start;
            let back = self.outrecs[or2].back_edge;
            self.outrecs[or1].back_edge = back;
            if let Some(be) = back {
                self.actives[be].outrec = Some(or1);
            }
        }

        // after joining the outrec of ae2 has no points
        self.outrecs[or2].front_edge = None;
        self.outrecs[or2].back_edge = None;
        self.outrecs[or2].pts = None;
        self.set_owner(or2, or1);

        if self.is_open_end(ae1) {
            self.outrecs[or2].pts = self.outrecs[or1].pts;
            self.outrecs[or1].pts = None;
        }

        // ae1 and ae2 are maxima and about to be dropped from the AEL
        self.actives[ae1].outrec = None;
        self.actives[ae2].outrec = None;
    }

    /// Add `pt` to the end of the ring which `ae` is extending, points which coincide with the
    /// current end of the ring are not duplicated.
    pub(super) fn add_out_pt(&mut self, ae: ActiveIdx, pt: Vector2<T>) -> Option<OutPtIdx> {
        let Some(outrec) = self.actives[ae].outrec else {
            self.succeeded = false;
            return None;
        };
        let Some(op_front) = self.outrecs[outrec].pts else {
            self.succeeded = false;
            return None;
        };

        let to_front = self.is_front(ae);
        let op_back = self.out_pts[op_front].next;
        if to_front && pt.fuzzy_eq_eps(self.out_pts[op_front].pt, self.eps) {
            return Some(op_front);
        }
        if !to_front && pt.fuzzy_eq_eps(self.out_pts[op_back].pt, self.eps) {
            return Some(op_back);
        }

        let new_op = self.new_out_pt(pt, outrec);
        self.out_pts[op_back].prev = new_op;
        self.out_pts[new_op].prev = op_front;
        self.out_pts[new_op].next = op_back;
        self.out_pts[op_front].next = new_op;
        if to_front {
            self.outrecs[outrec].pts = Some(new_op);
        }

        Some(new_op)
    }

    pub(super) fn start_open_path(&mut self, ae: ActiveIdx, pt: Vector2<T>) -> OutPtIdx {
        let outrec = self.new_outrec();
        self.outrecs[outrec].is_open = true;
        if self.actives[ae].wind_dx > 0 {
            self.outrecs[outrec].front_edge = Some(ae);
        } else {
            self.outrecs[outrec].back_edge = Some(ae);
        }

        self.actives[ae].outrec = Some(outrec);
        let op = self.new_out_pt(pt, outrec);
        self.outrecs[outrec].pts = Some(op);
        op
    }

    /// Separate a joined edge from its neighbor, a new output ring is started at `pt`.
    pub(super) fn split(&mut self, e: ActiveIdx, pt: Vector2<T>) {
        let right = self.actives[e].join_with == JoinWith::Right;
        self.actives[e].join_with = JoinWith::None;
        let other = if right {
            self.actives[e].next_in_ael
        } else {
            self.actives[e].prev_in_ael
        };

        let Some(other) = other else {
            self.succeeded = false;
            return;
        };

        self.actives[other].join_with = JoinWith::None;
        if right {
            self.add_local_min_poly(e, other, pt, true);
        } else {
            self.add_local_min_poly(other, e, pt, true);
        }
    }

    /// Returns `true` if `e` and `other` are hot closed non-horizontal edges which touch closely
    /// enough at `pt` to have their output rings joined.
    fn can_join(&self, e: ActiveIdx, other: ActiveIdx, pt: Vector2<T>, check_cur_x: bool) -> bool {
        if !self.is_hot(e)
            || !self.is_hot(other)
            || self.is_horizontal(e)
            || self.is_horizontal(other)
            || self.is_open(e)
            || self.is_open(other)
        {
            return false;
        }

        let (a, b) = (&self.actives[e], &self.actives[other]);
        // avoid trivial joins
        let window = T::two();
        if (pt.y < a.top.y + window || pt.y < b.top.y + window) && (a.bot.y > pt.y || b.bot.y > pt.y)
        {
            return false;
        }

        if check_cur_x {
            if perpendicular_dist_sq(pt, b.bot, b.top) > T::from(0.25).unwrap() {
                return false;
            }
        } else if a.cur_x != b.cur_x {
            return false;
        }

        is_collinear(a.top, pt, b.top, self.eps)
    }

    pub(super) fn check_join_left(&mut self, e: ActiveIdx, pt: Vector2<T>, check_cur_x: bool) {
        let Some(prev) = self.actives[e].prev_in_ael else {
            return;
        };
        if !self.can_join(e, prev, pt, check_cur_x) {
            return;
        }

        let (or_e, or_prev) = (self.actives[e].outrec, self.actives[prev].outrec);
        if or_e == or_prev {
            self.add_local_max_poly(prev, e, pt);
        } else if or_e < or_prev {
            self.join_outrec_paths(e, prev);
        } else {
            self.join_outrec_paths(prev, e);
        }

        self.actives[prev].join_with = JoinWith::Right;
        self.actives[e].join_with = JoinWith::Left;
    }

    pub(super) fn check_join_right(&mut self, e: ActiveIdx, pt: Vector2<T>, check_cur_x: bool) {
        let Some(next) = self.actives[e].next_in_ael else {
            return;
        };
        if !self.can_join(e, next, pt, check_cur_x) {
            return;
        }

        let (or_e, or_next) = (self.actives[e].outrec, self.actives[next].outrec);
        if or_e == or_next {
            self.add_local_max_poly(e, next, pt);
        } else if or_e < or_next {
            self.join_outrec_paths(e, next);
        } else {
            self.join_outrec_paths(next, e);
        }

        self.actives[e].join_with = JoinWith::Right;
        self.actives[next].join_with = JoinWith::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipper::{
            internal::{
                active_edge::Active,
                vertex_list::{LocalMinima, Vertex, VertexFlags},
            },
            ClipError, ClipType, ClipperOptions, FillRule, PathType,
        },
        core::math::vec2,
    };

    fn triangle_vertices() -> ([Vertex<f64>; 3], [LocalMinima; 1]) {
        let vertices = [
            Vertex {
                pt: vec2(0.0, 10.0),
                next: 1,
                prev: 2,
                flags: VertexFlags::LOCAL_MIN,
            },
            Vertex {
                pt: vec2(5.0, 0.0),
                next: 2,
                prev: 0,
                flags: VertexFlags::LOCAL_MAX,
            },
            Vertex {
                pt: vec2(10.0, 10.0),
                next: 0,
                prev: 1,
                flags: VertexFlags::NONE,
            },
        ];
        let minima = [LocalMinima {
            vertex: 0,
            path_type: PathType::Subject,
            is_open: false,
        }];
        (vertices, minima)
    }

    /// Give `ae` its own single point ring with `ae` as the front edge.
    fn start_ring(state: &mut SweepState<'_, f64>, ae: ActiveIdx) -> OutRecIdx {
        let outrec = state.new_outrec();
        let op = state.new_out_pt(state.actives[ae].bot, outrec);
        state.outrecs[outrec].pts = Some(op);
        state.outrecs[outrec].front_edge = Some(ae);
        state.actives[ae].outrec = Some(outrec);
        outrec
    }

    #[test]
    fn maxima_with_matching_sides_aborts_sweep() {
        let (vertices, minima) = triangle_vertices();
        let options = ClipperOptions::new();
        let mut state = SweepState::new(&vertices, &minima, &options, false);
        state
            .actives
            .push(Active::new(vec2(0.0, 10.0), vec2(5.0, 0.0), -1, 1, 0));
        state
            .actives
            .push(Active::new(vec2(10.0, 10.0), vec2(5.0, 0.0), 1, 1, 0));
        start_ring(&mut state, 0);
        start_ring(&mut state, 1);
        // both hot edges claim the front of their rings, a closed ring cannot be formed
        assert!(state.is_front(0) && state.is_front(1));

        let out_pt_count = state.out_pts.len();
        assert_eq!(state.add_local_max_poly(0, 1, vec2(5.0, 0.0)), None);
        assert!(!state.succeeded);
        assert_eq!(state.out_pts.len(), out_pt_count);

        let mut built = false;
        let result = state.collect_output(|s| {
            built = true;
            s.build_paths()
        });
        assert_eq!(result, Err(ClipError::SweepFailed));
        assert!(!built);
    }

    #[test]
    fn maxima_without_output_aborts_sweep() {
        let (vertices, minima) = triangle_vertices();
        let options = ClipperOptions::new();
        let mut state = SweepState::new(&vertices, &minima, &options, false);
        state
            .actives
            .push(Active::new(vec2(0.0, 10.0), vec2(5.0, 0.0), -1, 1, 0));
        state
            .actives
            .push(Active::new(vec2(10.0, 10.0), vec2(5.0, 0.0), 1, 1, 0));
        start_ring(&mut state, 0);

        assert_eq!(state.add_local_max_poly(0, 1, vec2(5.0, 0.0)), None);
        assert!(!state.succeeded);
        assert!(state.collect_output(|s| s.build_paths()).is_err());
    }

    #[test]
    fn completed_sweep_collects_output() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        assert!(state.execute(ClipType::Union, FillRule::NonZero, false));
        let (closed, open) = state.collect_output(|s| s.build_paths()).unwrap();
        assert!(closed.is_empty() && open.is_empty());
    }
}
