//! Path value types and the small geometric helpers that operate on them.
//!
//! A [Path] is an ordered sequence of points. Closed paths do not repeat their first point at the
//! end, the closing segment is implied. Orientation follows the usual Y axis up convention:
//! counter clockwise paths have positive area.
use crate::core::{
    math::{cross_product, dist_squared, Vector2},
    traits::Real,
};
use static_aabb2d_index::AABB;

/// Single 2D point of a path.
pub type Point<T = f64> = Vector2<T>;

/// Ordered sequence of points forming a polygon (closed) or polyline (open).
pub type Path<T = f64> = Vec<Vector2<T>>;

/// Collection of paths.
pub type Paths<T = f64> = Vec<Path<T>>;

/// Result of testing a point against a polygon, see [point_in_polygon].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointInPolygon {
    /// Point is strictly inside the polygon.
    Inside,
    /// Point is strictly outside the polygon.
    Outside,
    /// Point lies on the polygon boundary.
    On,
}

/// Signed area of a closed path (shoelace formula).
///
/// Area is positive for counter clockwise paths and negative for clockwise paths. Paths with less
/// than 3 points have zero area.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let ccw = path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// assert_eq!(path_area(&ccw), 100.0);
/// let cw = reverse_path(&ccw);
/// assert_eq!(path_area(&cw), -100.0);
/// ```
pub fn path_area<T>(path: &[Vector2<T>]) -> T
where
    T: Real,
{
    if path.len() < 3 {
        return T::zero();
    }

    let mut prev = path[path.len() - 1];
    let mut a = T::zero();
    for &pt in path {
        a = a + (prev.y + pt.y) * (prev.x - pt.x);
        prev = pt;
    }

    a * T::half()
}

/// Sum of the signed areas of all `paths`.
///
/// Holes are expected to have opposite orientation to their outer path so the result is the net
/// area covered.
pub fn paths_area<T>(paths: &[Path<T>]) -> T
where
    T: Real,
{
    paths
        .iter()
        .fold(T::zero(), |acc, p| acc + path_area(p))
}

/// Returns `true` if the path has non-negative signed area (counter clockwise).
#[inline]
pub fn is_positive<T>(path: &[Vector2<T>]) -> bool
where
    T: Real,
{
    path_area(path) >= T::zero()
}

/// Axis aligned bounding box of a path, `None` if the path is empty.
pub fn path_bounds<T>(path: &[Vector2<T>]) -> Option<AABB<T>>
where
    T: Real,
{
    let first = path.first()?;
    let mut result = AABB::new(first.x, first.y, first.x, first.y);
    for pt in path.iter().skip(1) {
        extend_bounds(&mut result, *pt);
    }

    Some(result)
}

/// Axis aligned bounding box of all points in `paths`, `None` if there are no points.
pub fn paths_bounds<T>(paths: &[Path<T>]) -> Option<AABB<T>>
where
    T: Real,
{
    let mut result: Option<AABB<T>> = None;
    for pt in paths.iter().flatten() {
        match result.as_mut() {
            Some(b) => extend_bounds(b, *pt),
            None => result = Some(AABB::new(pt.x, pt.y, pt.x, pt.y)),
        }
    }

    result
}

#[inline]
pub(crate) fn extend_bounds<T>(bounds: &mut AABB<T>, pt: Vector2<T>)
where
    T: Real,
{
    bounds.min_x = num_traits::real::Real::min(bounds.min_x, pt.x);
    bounds.min_y = num_traits::real::Real::min(bounds.min_y, pt.y);
    bounds.max_x = num_traits::real::Real::max(bounds.max_x, pt.x);
    bounds.max_y = num_traits::real::Real::max(bounds.max_y, pt.y);
}

/// Returns a copy of `path` with every point offset by (`dx`, `dy`).
pub fn translate_path<T>(path: &[Vector2<T>], dx: T, dy: T) -> Path<T>
where
    T: Real,
{
    let offset = Vector2::new(dx, dy);
    path.iter().map(|&pt| pt + offset).collect()
}

/// Returns a copy of `paths` with every point offset by (`dx`, `dy`).
pub fn translate_paths<T>(paths: &[Path<T>], dx: T, dy: T) -> Paths<T>
where
    T: Real,
{
    paths.iter().map(|p| translate_path(p, dx, dy)).collect()
}

/// Returns a copy of `path` with point order reversed (flips orientation).
pub fn reverse_path<T>(path: &[Vector2<T>]) -> Path<T>
where
    T: Real,
{
    path.iter().rev().copied().collect()
}

/// Returns a copy of `paths` with every path reversed.
pub fn reverse_paths<T>(paths: &[Path<T>]) -> Paths<T>
where
    T: Real,
{
    paths.iter().map(|p| reverse_path(p)).collect()
}

/// Removes consecutive points that are closer than `sqrt(min_edge_len_sq)` to the last kept
/// point. If `is_closed` is true the last point is also compared against the first.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let p = path![(0.0, 0.0), (0.001, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0005)];
/// let stripped = strip_near_duplicates(&p, 0.01 * 0.01, true);
/// assert_eq!(stripped, path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
/// ```
pub fn strip_near_duplicates<T>(path: &[Vector2<T>], min_edge_len_sq: T, is_closed: bool) -> Path<T>
where
    T: Real,
{
    let mut result = Vec::with_capacity(path.len());
    let Some(&first) = path.first() else {
        return result;
    };

    let mut last = first;
    result.push(last);
    for &pt in path.iter().skip(1) {
        if dist_squared(last, pt) >= min_edge_len_sq {
            last = pt;
            result.push(pt);
        }
    }

    if is_closed && result.len() > 1 && dist_squared(last, first) < min_edge_len_sq {
        result.pop();
    }

    result
}

/// Polygon approximation of an ellipse centered at `center`.
///
/// If `radius_y` is not positive then `radius_x` is used (circle). If `steps` is less than 3 then
/// a step count is derived from the radii.
pub fn ellipse<T>(center: Vector2<T>, radius_x: T, radius_y: T, steps: usize) -> Path<T>
where
    T: Real,
{
    if radius_x <= T::zero() {
        return Vec::new();
    }

    let radius_y = if radius_y <= T::zero() {
        radius_x
    } else {
        radius_y
    };

    let steps = if steps < 3 {
        let pi = T::tau() * T::half();
        let avg = (radius_x + radius_y) * T::half();
        (pi * avg.sqrt()).ceil().to_usize().unwrap_or(3).max(3)
    } else {
        steps
    };

    let step_angle = T::tau() / T::from(steps).unwrap();
    let (si, co) = step_angle.sin_cos();
    let (mut dx, mut dy) = (co, si);
    let mut result = Vec::with_capacity(steps);
    result.push(Vector2::new(center.x + radius_x, center.y));
    for _ in 1..steps {
        result.push(Vector2::new(center.x + radius_x * dx, center.y + radius_y * dy));
        let x = dx * co - dy * si;
        dy = dy * co + dx * si;
        dx = x;
    }

    result
}

/// Determine if `pt` is inside, outside, or on the boundary of `polygon`.
///
/// Uses a horizontal ray crossing count with exact on boundary detection. Works for either
/// orientation and self intersecting polygons (even-odd interpretation).
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let square = path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// assert_eq!(point_in_polygon(vec2(5.0, 5.0), &square), PointInPolygon::Inside);
/// assert_eq!(point_in_polygon(vec2(15.0, 5.0), &square), PointInPolygon::Outside);
/// assert_eq!(point_in_polygon(vec2(10.0, 5.0), &square), PointInPolygon::On);
/// ```
pub fn point_in_polygon<T>(pt: Vector2<T>, polygon: &[Vector2<T>]) -> PointInPolygon
where
    T: Real,
{
    let len = polygon.len();
    if len < 3 {
        return PointInPolygon::Outside;
    }

    let mut start = 0;
    while start < len && polygon[start].y == pt.y {
        start += 1;
    }
    if start == len {
        return PointInPolygon::Outside;
    }

    let mut is_above = polygon[start].y < pt.y;
    let starting_above = is_above;
    let mut inside = false;
    let mut i = start + 1;
    let mut end = len;
    loop {
        if i == end {
            if end == 0 || start == 0 {
                break;
            }
            end = start;
            i = 0;
        }

        if is_above {
            while i < end && polygon[i].y < pt.y {
                i += 1;
            }
        } else {
            while i < end && polygon[i].y > pt.y {
                i += 1;
            }
        }

        if i == end {
            continue;
        }

        let curr = polygon[i];
        let prev = if i > 0 {
            polygon[i - 1]
        } else {
            polygon[len - 1]
        };

        if curr.y == pt.y {
            if curr.x == pt.x || (curr.y == prev.y && ((pt.x < prev.x) != (pt.x < curr.x))) {
                return PointInPolygon::On;
            }
            i += 1;
            if i == start {
                break;
            }
            continue;
        }

        if pt.x < curr.x && pt.x < prev.x {
            // edge is entirely to the right of the point
        } else if pt.x > prev.x && pt.x > curr.x {
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

        is_above = !is_above;
        i += 1;
    }

    if is_above != starting_above {
        if i == len {
            i = 0;
        }
        let d = if i == 0 {
            cross_product(polygon[len - 1], polygon[0], pt)
        } else {
            cross_product(polygon[i - 1], polygon[i], pt)
        };
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
