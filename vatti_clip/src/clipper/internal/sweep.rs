use super::{
    active_edge::{Active, ActiveIdx, IntersectNode},
    out_rec::{HorzJoin, HorzSegment, OutPt, OutRec},
    vertex_list::{LocalMinima, Vertex, VertexFlags, VertexIdx},
};
use crate::{
    clipper::{ClipError, ClipType, ClipperOptions, FillRule, PathType},
    core::{math::cross_product, traits::Real},
};

/// All mutable state of a single clipping sweep.
///
/// The state borrows the input vertexes and the sorted local minima, everything else (active
/// edges, output rings, scanlines) is owned and dropped with the state. A fresh state is created
/// for every execution so a failed sweep never leaks into the next one.
#[derive(Debug)]
pub struct SweepState<'a, T>
where
    T: Real,
{
    pub(super) vertices: &'a [Vertex<T>],
    pub(super) minima: &'a [LocalMinima],
    pub(super) clip_type: ClipType,
    pub(super) fill_rule: FillRule,
    pub(super) eps: T,
    pub(super) preserve_collinear: bool,
    pub(super) reverse_solution: bool,
    pub(super) min_split_area: T,
    pub(super) has_open_paths: bool,
    pub(super) using_tree: bool,
    pub(super) actives: Vec<Active<T>>,
    /// First edge in the AEL.
    pub(super) ael_first: Option<ActiveIdx>,
    /// First edge in the SEL.
    pub(super) sel_first: Option<ActiveIdx>,
    pub(super) intersect_list: Vec<IntersectNode<T>>,
    pub(super) out_pts: Vec<OutPt<T>>,
    pub(super) outrecs: Vec<OutRec<T>>,
    /// Pending scanlines sorted ascending, popped from the back.
    pub(super) scanlines: Vec<T>,
    pub(super) horz_segs: Vec<HorzSegment>,
    pub(super) horz_joins: Vec<HorzJoin>,
    pub(super) current_loc_min: usize,
    pub(super) current_bot_y: T,
    pub(super) succeeded: bool,
}

impl<'a, T> SweepState<'a, T>
where
    T: Real,
{
    /// Create a new sweep over `vertices`, `minima` must be sorted by descending Y.
    pub fn new(
        vertices: &'a [Vertex<T>],
        minima: &'a [LocalMinima],
        options: &ClipperOptions<T>,
        has_open_paths: bool,
    ) -> Self {
        Self {
            vertices,
            minima,
            clip_type: ClipType::NoClip,
            fill_rule: FillRule::EvenOdd,
            eps: options.eps,
            preserve_collinear: options.preserve_collinear,
            reverse_solution: options.reverse_solution,
            min_split_area: options.min_split_area,
            has_open_paths,
            using_tree: false,
            actives: Vec::new(),
            ael_first: None,
            sel_first: None,
            intersect_list: Vec::new(),
            out_pts: Vec::new(),
            outrecs: Vec::new(),
            scanlines: Vec::with_capacity(minima.len()),
            horz_segs: Vec::new(),
            horz_joins: Vec::new(),
            current_loc_min: 0,
            current_bot_y: T::zero(),
            succeeded: true,
        }
    }

    /// Run the sweep, returns false if the sweep was aborted due to inconsistent topology.
    ///
    /// `using_tree` must be set if the output is going to be built with
    /// [SweepState::build_tree] (ownership is then tracked more precisely during the sweep).
    pub fn execute(&mut self, clip_type: ClipType, fill_rule: FillRule, using_tree: bool) -> bool {
        self.clip_type = clip_type;
        self.fill_rule = fill_rule;
        self.using_tree = using_tree;
        if clip_type == ClipType::NoClip {
            return true;
        }

        self.scanlines
            .extend(self.minima.iter().rev().map(|lm| self.vertices[lm.vertex].pt.y));

        let mut y = match self.pop_scanline() {
            Some(y) => y,
            None => return true,
        };

        while self.succeeded {
            self.insert_local_minima_into_ael(y);
            while let Some(ae) = self.pop_horz() {
                self.do_horizontal(ae);
            }

            if !self.horz_segs.is_empty() {
                self.convert_horz_segs_to_joins();
                self.horz_segs.clear();
            }

            self.current_bot_y = y;
            y = match self.pop_scanline() {
                Some(y) => y,
                None => break,
            };

            self.do_intersections(y);
            self.do_top_of_scanbeam(y);
            while let Some(ae) = self.pop_horz() {
                self.do_horizontal(ae);
            }
        }

        if self.succeeded {
            self.process_horz_joins();
        } else {
            log::debug!(
                "sweep aborted at y = {:?} with {} active edges created",
                self.current_bot_y,
                self.actives.len()
            );
        }

        self.succeeded
    }

    /// Build the output of a completed sweep with `build`, nothing is built if the sweep was
    /// aborted.
    pub fn collect_output<R, F>(&mut self, build: F) -> Result<R, ClipError>
    where
        F: FnOnce(&mut Self) -> R,
    {
        if !self.succeeded {
            return Err(ClipError::SweepFailed);
        }

        Ok(build(self))
    }

    // edge property helpers

    #[inline]
    pub(super) fn local_min(&self, ae: ActiveIdx) -> &LocalMinima {
        &self.minima[self.actives[ae].local_min]
    }

    #[inline]
    pub(super) fn is_open(&self, ae: ActiveIdx) -> bool {
        self.local_min(ae).is_open
    }

    #[inline]
    pub(super) fn poly_type(&self, ae: ActiveIdx) -> PathType {
        self.local_min(ae).path_type
    }

    #[inline]
    pub(super) fn is_same_poly_type(&self, ae1: ActiveIdx, ae2: ActiveIdx) -> bool {
        self.poly_type(ae1) == self.poly_type(ae2)
    }

    #[inline]
    pub(super) fn is_open_end(&self, ae: ActiveIdx) -> bool {
        self.is_open(ae) && self.vertices[self.actives[ae].vertex_top].is_open_end()
    }

    #[inline]
    pub(super) fn is_maxima(&self, ae: ActiveIdx) -> bool {
        self.vertices[self.actives[ae].vertex_top].is_maxima()
    }

    #[inline]
    pub(super) fn is_hot(&self, ae: ActiveIdx) -> bool {
        self.actives[ae].is_hot()
    }

    #[inline]
    pub(super) fn is_horizontal(&self, ae: ActiveIdx) -> bool {
        self.actives[ae].is_horizontal()
    }

    /// Vertex following the top of the edge in the edge's direction of travel.
    #[inline]
    pub(super) fn next_vertex(&self, ae: ActiveIdx) -> VertexIdx {
        let a = &self.actives[ae];
        let v = &self.vertices[a.vertex_top];
        if a.wind_dx > 0 {
            v.next
        } else {
            v.prev
        }
    }

    /// Vertex two steps before the top of the edge in the edge's direction of travel.
    #[inline]
    pub(super) fn prev_prev_vertex(&self, ae: ActiveIdx) -> VertexIdx {
        let a = &self.actives[ae];
        let v = &self.vertices[a.vertex_top];
        if a.wind_dx > 0 {
            self.vertices[v.prev].prev
        } else {
            self.vertices[v.next].next
        }
    }

    pub(super) fn get_maxima_pair(&self, ae: ActiveIdx) -> Option<ActiveIdx> {
        let vertex_top = self.actives[ae].vertex_top;
        let mut ae2 = self.actives[ae].next_in_ael;
        while let Some(e) = ae2 {
            if self.actives[e].vertex_top == vertex_top {
                return Some(e);
            }
            ae2 = self.actives[e].next_in_ael;
        }
        None
    }

    /// Nearest hot, closed edge to the left of `ae` in the AEL.
    pub(super) fn get_prev_hot_edge(&self, ae: ActiveIdx) -> Option<ActiveIdx> {
        let mut prev = self.actives[ae].prev_in_ael;
        while let Some(p) = prev {
            if !self.is_open(p) && self.is_hot(p) {
                return Some(p);
            }
            prev = self.actives[p].prev_in_ael;
        }
        None
    }

    // scanlines and local minima

    pub(super) fn insert_scanline(&mut self, y: T) {
        let idx = self.scanlines.partition_point(|&s| s < y);
        if self.scanlines.get(idx) != Some(&y) {
            self.scanlines.insert(idx, y);
        }
    }

    fn pop_scanline(&mut self) -> Option<T> {
        let y = self.scanlines.pop()?;
        while self.scanlines.last() == Some(&y) {
            self.scanlines.pop();
        }
        Some(y)
    }

    fn has_loc_min_at_y(&self, y: T) -> bool {
        self.current_loc_min < self.minima.len()
            && self.vertices[self.minima[self.current_loc_min].vertex].pt.y == y
    }

    fn new_active(&mut self, wind_dx: i32, vertex_top: VertexIdx, local_min: usize) -> ActiveIdx {
        let bot = self.vertices[self.minima[local_min].vertex].pt;
        let top = self.vertices[vertex_top].pt;
        self.actives
            .push(Active::new(bot, top, wind_dx, vertex_top, local_min));
        self.actives.len() - 1
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: T) {
        while self.has_loc_min_at_y(bot_y) {
            let lm_idx = self.current_loc_min;
            self.current_loc_min += 1;
            let vertex = self.vertices[self.minima[lm_idx].vertex];

            let mut left_bound = if vertex.flags.intersects(VertexFlags::OPEN_START) {
                None
            } else {
                Some(self.new_active(-1, vertex.prev, lm_idx))
            };

            let mut right_bound = if vertex.flags.intersects(VertexFlags::OPEN_END) {
                None
            } else {
                Some(self.new_active(1, vertex.next, lm_idx))
            };

            match (left_bound, right_bound) {
                (Some(l), Some(r)) => {
                    let (la, ra) = (&self.actives[l], &self.actives[r]);
                    let swap = if la.is_horizontal() {
                        la.is_heading_right_horz()
                    } else if ra.is_horizontal() {
                        ra.is_heading_left_horz()
                    } else {
                        la.dx < ra.dx
                    };
                    if swap {
                        std::mem::swap(&mut left_bound, &mut right_bound);
                    }
                }
                (None, _) => {
                    left_bound = right_bound.take();
                }
                _ => {}
            }

            let left_bound = match left_bound {
                Some(l) => l,
                None => continue,
            };

            self.actives[left_bound].is_left_bound = true;
            self.insert_left_edge(left_bound);

            let contributing = if self.is_open(left_bound) {
                self.set_wind_count_for_open_path_edge(left_bound);
                self.is_contributing_open(left_bound)
            } else {
                self.set_wind_count_for_closed_path_edge(left_bound);
                self.is_contributing_closed(left_bound)
            };

            if let Some(right_bound) = right_bound {
                self.actives[right_bound].wind_count = self.actives[left_bound].wind_count;
                self.actives[right_bound].wind_count2 = self.actives[left_bound].wind_count2;
                self.insert_right_edge(left_bound, right_bound);

                if contributing {
                    let bot = self.actives[left_bound].bot;
                    self.add_local_min_poly(left_bound, right_bound, bot, true);
                    if !self.is_horizontal(left_bound) {
                        self.check_join_left(left_bound, bot, false);
                    }
                }

                while let Some(next) = self.actives[right_bound].next_in_ael {
                    if !self.is_valid_ael_order(next, right_bound) {
                        break;
                    }
                    let bot = self.actives[right_bound].bot;
                    self.intersect_edges(right_bound, next, bot);
                    self.swap_positions_in_ael(right_bound, next);
                }

                if self.is_horizontal(right_bound) {
                    self.push_horz(right_bound);
                } else {
                    let bot = self.actives[right_bound].bot;
                    self.check_join_right(right_bound, bot, false);
                    self.insert_scanline(self.actives[right_bound].top.y);
                }
            } else if contributing {
                let bot = self.actives[left_bound].bot;
                self.start_open_path(left_bound, bot);
            }

            if self.is_horizontal(left_bound) {
                self.push_horz(left_bound);
            } else {
                self.insert_scanline(self.actives[left_bound].top.y);
            }
        }
    }

    /// Returns `true` if `newcomer` belongs to the right of `resident` in the AEL, both edges
    /// share the current scanline.
    pub(super) fn is_valid_ael_order(&self, resident: ActiveIdx, newcomer: ActiveIdx) -> bool {
        let r = &self.actives[resident];
        let n = &self.actives[newcomer];
        if n.cur_x != r.cur_x {
            return n.cur_x > r.cur_x;
        }

        // get the turning direction a1.top, a2.bot, a2.top
        let d = cross_product(r.top, n.bot, n.top);
        if d != T::zero() {
            return d < T::zero();
        }

        // edges must be collinear to get here

        if !self.is_maxima(resident) && r.top.y > n.top.y {
            let next = self.vertices[self.next_vertex(resident)].pt;
            return cross_product(n.bot, r.top, next) <= T::zero();
        }

        if !self.is_maxima(newcomer) && n.top.y > r.top.y {
            let next = self.vertices[self.next_vertex(newcomer)].pt;
            return cross_product(n.bot, n.top, next) >= T::zero();
        }

        let y = n.bot.y;
        let newcomer_is_left = n.is_left_bound;
        if r.bot.y != y || self.vertices[self.local_min(resident).vertex].pt.y != y {
            return newcomer_is_left;
        }

        // resident must also have just been inserted
        if r.is_left_bound != newcomer_is_left {
            return newcomer_is_left;
        }

        let resident_pp = self.vertices[self.prev_prev_vertex(resident)].pt;
        if cross_product(resident_pp, r.bot, r.top) == T::zero() {
            return true;
        }

        // compare turning direction of the alternate bound
        let newcomer_pp = self.vertices[self.prev_prev_vertex(newcomer)].pt;
        (cross_product(resident_pp, n.bot, newcomer_pp) > T::zero()) == newcomer_is_left
    }

    fn insert_left_edge(&mut self, ae: ActiveIdx) {
        let first = match self.ael_first {
            None => {
                self.actives[ae].prev_in_ael = None;
                self.actives[ae].next_in_ael = None;
                self.ael_first = Some(ae);
                return;
            }
            Some(first) => first,
        };

        if !self.is_valid_ael_order(first, ae) {
            self.actives[ae].prev_in_ael = None;
            self.actives[ae].next_in_ael = Some(first);
            self.actives[first].prev_in_ael = Some(ae);
            self.ael_first = Some(ae);
            return;
        }

        let mut ae2 = first;
        while let Some(next) = self.actives[ae2].next_in_ael {
            if !self.is_valid_ael_order(next, ae) {
                break;
            }
            ae2 = next;
        }

        // don't separate joined edges
        if self.actives[ae2].join_with == super::active_edge::JoinWith::Right {
            if let Some(next) = self.actives[ae2].next_in_ael {
                ae2 = next;
            }
        }

        let next = self.actives[ae2].next_in_ael;
        self.actives[ae].next_in_ael = next;
        if let Some(next) = next {
            self.actives[next].prev_in_ael = Some(ae);
        }
        self.actives[ae].prev_in_ael = Some(ae2);
        self.actives[ae2].next_in_ael = Some(ae);
    }

    fn insert_right_edge(&mut self, ae: ActiveIdx, ae2: ActiveIdx) {
        let next = self.actives[ae].next_in_ael;
        self.actives[ae2].next_in_ael = next;
        if let Some(next) = next {
            self.actives[next].prev_in_ael = Some(ae2);
        }
        self.actives[ae2].prev_in_ael = Some(ae);
        self.actives[ae].next_in_ael = Some(ae2);
    }

    pub(super) fn delete_from_ael(&mut self, ae: ActiveIdx) {
        let prev = self.actives[ae].prev_in_ael;
        let next = self.actives[ae].next_in_ael;
        if prev.is_none() && next.is_none() && self.ael_first != Some(ae) {
            // already deleted
            return;
        }

        match prev {
            Some(p) => self.actives[p].next_in_ael = next,
            None => self.ael_first = next,
        }

        if let Some(n) = next {
            self.actives[n].prev_in_ael = prev;
        }

        self.actives[ae].prev_in_ael = None;
        self.actives[ae].next_in_ael = None;
    }

    /// Swap `ae1` with `ae2` in the AEL, `ae2` must directly follow `ae1`.
    pub(super) fn swap_positions_in_ael(&mut self, ae1: ActiveIdx, ae2: ActiveIdx) {
        let next = self.actives[ae2].next_in_ael;
        if let Some(n) = next {
            self.actives[n].prev_in_ael = Some(ae1);
        }
        let prev = self.actives[ae1].prev_in_ael;
        if let Some(p) = prev {
            self.actives[p].next_in_ael = Some(ae2);
        }
        self.actives[ae2].prev_in_ael = prev;
        self.actives[ae2].next_in_ael = Some(ae1);
        self.actives[ae1].prev_in_ael = Some(ae2);
        self.actives[ae1].next_in_ael = next;
        if prev.is_none() {
            self.ael_first = Some(ae2);
        }
    }

    pub(super) fn push_horz(&mut self, ae: ActiveIdx) {
        self.actives[ae].next_in_sel = self.sel_first;
        self.sel_first = Some(ae);
    }

    fn pop_horz(&mut self) -> Option<ActiveIdx> {
        let ae = self.sel_first?;
        self.sel_first = self.actives[ae].next_in_sel;
        Some(ae)
    }

    // winding counts

    fn set_wind_count_for_closed_path_edge(&mut self, ae: ActiveIdx) {
        // wind counts refer to polygon regions not edges, so here an edge's wind count indicates
        // the higher of the wind counts for the two regions touching the edge
        let pt = self.poly_type(ae);
        let mut ae2 = self.actives[ae].prev_in_ael;
        while let Some(e) = ae2 {
            if self.poly_type(e) == pt && !self.is_open(e) {
                break;
            }
            ae2 = self.actives[e].prev_in_ael;
        }

        let wind_dx = self.actives[ae].wind_dx;
        let mut iter = match ae2 {
            None => {
                self.actives[ae].wind_count = wind_dx;
                self.ael_first
            }
            Some(e2) if self.fill_rule == FillRule::EvenOdd => {
                self.actives[ae].wind_count = wind_dx;
                self.actives[ae].wind_count2 = self.actives[e2].wind_count2;
                self.actives[e2].next_in_ael
            }
            Some(e2) => {
                let (e2_wc, e2_wdx) = (self.actives[e2].wind_count, self.actives[e2].wind_dx);
                // NonZero, Positive or Negative filling here
                let wind_count = if e2_wc * e2_wdx < 0 {
                    // prev edge is 'decreasing' wind count toward zero so we're outside the
                    // previous polygon
                    if e2_wc.abs() > 1 {
                        // outside prev poly but still inside another
                        if e2_wdx * wind_dx < 0 {
                            // reversing direction so use the same wc
                            e2_wc
                        } else {
                            e2_wc + wind_dx
                        }
                    } else if self.is_open(ae) {
                        1
                    } else {
                        wind_dx
                    }
                } else if e2_wdx * wind_dx < 0 {
                    // prev edge is 'increasing' wind count away from zero so we're inside the
                    // previous polygon, reversing direction so use the same wc
                    e2_wc
                } else {
                    e2_wc + wind_dx
                };

                self.actives[ae].wind_count = wind_count;
                self.actives[ae].wind_count2 = self.actives[e2].wind_count2;
                self.actives[e2].next_in_ael
            }
        };

        // update wind_count2
        while let Some(e) = iter {
            if e == ae {
                break;
            }
            if self.poly_type(e) != pt && !self.is_open(e) {
                let wc2 = self.actives[ae].wind_count2;
                self.actives[ae].wind_count2 = if self.fill_rule == FillRule::EvenOdd {
                    if wc2 == 0 {
                        1
                    } else {
                        0
                    }
                } else {
                    wc2 + self.actives[e].wind_dx
                };
            }
            iter = self.actives[e].next_in_ael;
        }
    }

    fn set_wind_count_for_open_path_edge(&mut self, ae: ActiveIdx) {
        let mut cnt1 = 0;
        let mut cnt2 = 0;
        let mut iter = self.ael_first;
        let even_odd = self.fill_rule == FillRule::EvenOdd;
        while let Some(e) = iter {
            if e == ae {
                break;
            }
            let inc = if even_odd { 1 } else { self.actives[e].wind_dx };
            if self.poly_type(e) == PathType::Clip {
                cnt2 += inc;
            } else if !self.is_open(e) {
                cnt1 += inc;
            }
            iter = self.actives[e].next_in_ael;
        }

        if even_odd {
            self.actives[ae].wind_count = cnt1 & 1;
            self.actives[ae].wind_count2 = cnt2 & 1;
        } else {
            self.actives[ae].wind_count = cnt1;
            self.actives[ae].wind_count2 = cnt2;
        }
    }

    fn is_contributing_closed(&self, ae: ActiveIdx) -> bool {
        let a = &self.actives[ae];
        match self.fill_rule {
            FillRule::Positive if a.wind_count != 1 => return false,
            FillRule::Negative if a.wind_count != -1 => return false,
            FillRule::NonZero if a.wind_count.abs() != 1 => return false,
            _ => {}
        }

        let wc2 = a.wind_count2;
        let outside_other = || match self.fill_rule {
            FillRule::Positive => wc2 <= 0,
            FillRule::Negative => wc2 >= 0,
            _ => wc2 == 0,
        };

        match self.clip_type {
            ClipType::Intersection => !outside_other(),
            ClipType::Union => outside_other(),
            ClipType::Difference => {
                let result = outside_other();
                if self.poly_type(ae) == PathType::Subject {
                    result
                } else {
                    !result
                }
            }
            ClipType::Xor => true,
            ClipType::NoClip => false,
        }
    }

    fn is_contributing_open(&self, ae: ActiveIdx) -> bool {
        let a = &self.actives[ae];
        let (is_in_subj, is_in_clip) = match self.fill_rule {
            FillRule::Positive => (a.wind_count > 0, a.wind_count2 > 0),
            FillRule::Negative => (a.wind_count < 0, a.wind_count2 < 0),
            _ => (a.wind_count != 0, a.wind_count2 != 0),
        };

        match self.clip_type {
            ClipType::Intersection => is_in_clip,
            ClipType::Union => !is_in_subj && !is_in_clip,
            _ => !is_in_clip,
        }
    }

    // top of scanbeam

    fn do_top_of_scanbeam(&mut self, y: T) {
        // sel_first is reused to flag horizontals
        self.sel_first = None;
        let mut iter = self.ael_first;
        while let Some(ae) = iter {
            // nb: 'ae' will never be horizontal here
            if self.actives[ae].top.y == y {
                self.actives[ae].cur_x = self.actives[ae].top.x;
                if self.is_maxima(ae) {
                    // TOP OF BOUND (MAXIMA)
                    iter = self.do_maxima(ae);
                    continue;
                }

                // INTERMEDIATE VERTEX
                if self.is_hot(ae) {
                    let top = self.actives[ae].top;
                    self.add_out_pt(ae, top);
                }
                self.update_edge_into_ael(ae);
                if self.is_horizontal(ae) {
                    // horizontals are processed later
                    self.push_horz(ae);
                }
            } else {
                // i.e. not the top of the edge
                self.actives[ae].cur_x = self.actives[ae].top_x(y);
            }

            iter = self.actives[ae].next_in_ael;
        }
    }

    fn do_maxima(&mut self, ae: ActiveIdx) -> Option<ActiveIdx> {
        let prev_e = self.actives[ae].prev_in_ael;
        let mut next_e = self.actives[ae].next_in_ael;
        let top = self.actives[ae].top;

        if self.is_open_end(ae) {
            if self.is_hot(ae) {
                self.add_out_pt(ae, top);
            }
            if !self.is_horizontal(ae) {
                self.detach_open_end(ae);
                self.delete_from_ael(ae);
            }
            return next_e;
        }

        let max_pair = match self.get_maxima_pair(ae) {
            Some(e) => e,
            // e.g. a horizontal maxima which is processed later
            None => return next_e,
        };

        if self.actives[ae].is_joined() {
            self.split(ae, top);
        }
        if self.actives[max_pair].is_joined() {
            let pair_top = self.actives[max_pair].top;
            self.split(max_pair, pair_top);
        }

        // only non-horizontal maxima here, process any edges between maxima pair
        while let Some(next) = next_e {
            if next == max_pair {
                break;
            }
            self.intersect_edges(ae, next, top);
            self.swap_positions_in_ael(ae, next);
            next_e = self.actives[ae].next_in_ael;
        }

        if self.is_hot(ae) {
            self.add_local_max_poly(ae, max_pair, top);
        }
        self.delete_from_ael(ae);
        self.delete_from_ael(max_pair);

        match prev_e {
            Some(p) => self.actives[p].next_in_ael,
            None => self.ael_first,
        }
    }

    /// Stop a hot open edge from extending its output path.
    pub(super) fn detach_open_end(&mut self, ae: ActiveIdx) {
        if let Some(or) = self.actives[ae].outrec.take() {
            if self.outrecs[or].front_edge == Some(ae) {
                self.outrecs[or].front_edge = None;
            } else {
                self.outrecs[or].back_edge = None;
            }
        }
    }

    pub(super) fn update_edge_into_ael(&mut self, ae: ActiveIdx) {
        let next_vertex = self.next_vertex(ae);
        let top = self.vertices[next_vertex].pt;
        let a = &mut self.actives[ae];
        a.bot = a.top;
        a.vertex_top = next_vertex;
        a.top = top;
        a.cur_x = a.bot.x;
        a.set_dx();
        let bot = a.bot;

        if a.is_joined() {
            self.split(ae, bot);
        }

        if self.is_horizontal(ae) {
            if !self.is_open(ae) {
                self.trim_horz(ae);
            }
            return;
        }

        self.insert_scanline(top.y);
        self.check_join_left(ae, bot, false);
        self.check_join_right(ae, bot, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipper::internal::vertex_list::add_paths_to_vertex_list, core::math::vec2, path::Path,
    };

    fn sorted_input(paths: &[Path<f64>]) -> (Vec<Vertex<f64>>, Vec<LocalMinima>) {
        let mut vertices = Vec::new();
        let mut minima = Vec::new();
        add_paths_to_vertex_list(
            paths,
            PathType::Subject,
            false,
            &ClipperOptions::new(),
            &mut vertices,
            &mut minima,
        );
        minima.sort_by(|a, b| {
            vertices[b.vertex]
                .pt
                .y
                .cmp_real(&vertices[a.vertex].pt.y)
        });
        (vertices, minima)
    }

    #[test]
    fn scanlines_sorted_and_deduplicated() {
        let options = ClipperOptions::new();
        let mut state = SweepState::<f64>::new(&[], &[], &options, false);
        for y in [3.0, 1.0, 2.0, 3.0, 1.0] {
            state.insert_scanline(y);
        }
        assert_eq!(state.scanlines, vec![1.0, 2.0, 3.0]);
        assert_eq!(state.pop_scanline(), Some(3.0));
        state.scanlines.push(2.0);
        assert_eq!(state.pop_scanline(), Some(2.0));
        assert_eq!(state.pop_scanline(), Some(1.0));
        assert_eq!(state.pop_scanline(), None);
    }

    #[test]
    fn minima_insertion_orders_ael_by_x() {
        // two triangles side by side with minima (largest Y) on the same scanline
        let (vertices, minima) = sorted_input(&[
            vec![vec2(20.0, 0.0), vec2(30.0, 0.0), vec2(25.0, 10.0)],
            vec![vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(5.0, 10.0)],
        ]);
        assert_eq!(minima.len(), 2);
        let options = ClipperOptions::new();
        let mut state = SweepState::new(&vertices, &minima, &options, false);
        state.clip_type = ClipType::Union;
        state.fill_rule = FillRule::NonZero;
        state.insert_local_minima_into_ael(10.0);

        let mut xs = Vec::new();
        let mut slopes = Vec::new();
        let mut iter = state.ael_first;
        while let Some(e) = iter {
            xs.push(state.actives[e].cur_x);
            slopes.push(state.actives[e].top.x);
            iter = state.actives[e].next_in_ael;
        }
        assert_eq!(xs, vec![5.0, 5.0, 25.0, 25.0]);
        // left bound of each pair heads to the left
        assert_eq!(slopes, vec![0.0, 10.0, 20.0, 30.0]);

        // both bounds of a minima contribute and share one output ring
        let first = state.ael_first.unwrap();
        let second = state.actives[first].next_in_ael.unwrap();
        assert!(state.is_hot(first));
        assert_eq!(state.actives[first].outrec, state.actives[second].outrec);
        assert_eq!(state.outrecs.len(), 2);
        assert_eq!(state.scanlines, vec![0.0]);
    }

    #[test]
    fn nested_minima_wind_counts() {
        let (vertices, minima) = sorted_input(&[
            vec![vec2(0.0, 0.0), vec2(30.0, 0.0), vec2(15.0, 30.0)],
            vec![vec2(10.0, 5.0), vec2(20.0, 5.0), vec2(15.0, 15.0)],
        ]);
        let options = ClipperOptions::new();
        let mut state = SweepState::new(&vertices, &minima, &options, false);
        assert!(state.execute(ClipType::Union, FillRule::NonZero, false));
        // inner triangle has the same orientation so it is swallowed by the union
        let closed = state.build_paths().0;
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].len(), 3);
    }
}
