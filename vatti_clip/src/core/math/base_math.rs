use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use vatti_clip::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Midpoint of a line segment defined by `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) / T::two(), (p0.y + p1.y) / T::two())
}

/// Cross product of the two consecutive segments `p1 -> p2` and `p2 -> p3`.
///
/// Result is positive if `p3` is a left (counter clockwise) turn from `p1 -> p2`, negative for a
/// right turn, and zero if the three points are collinear.
///
/// # Examples
///
/// ```
/// # use vatti_clip::core::math::*;
/// assert!(cross_product(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0)) > 0.0);
/// assert!(cross_product(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, -1.0)) < 0.0);
/// assert_eq!(cross_product(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(2.0, 0.0)), 0.0);
/// ```
#[inline]
pub fn cross_product<T>(p1: Vector2<T>, p2: Vector2<T>, p3: Vector2<T>) -> T
where
    T: Real,
{
    (p2.x - p1.x) * (p3.y - p2.y) - (p2.y - p1.y) * (p3.x - p2.x)
}

/// Dot product of the two consecutive segments `p1 -> p2` and `p2 -> p3`.
///
/// Result is negative if the path doubles back on itself at `p2` (turn greater than 90 degrees).
#[inline]
pub fn dot_product<T>(p1: Vector2<T>, p2: Vector2<T>, p3: Vector2<T>) -> T
where
    T: Real,
{
    (p2.x - p1.x) * (p3.x - p2.x) + (p2.y - p1.y) * (p3.y - p2.y)
}

/// Returns `true` if `p1`, `p2`, and `p3` lie on the same line, using `eps` as the tolerance on
/// the cross product.
#[inline]
pub fn is_collinear<T>(p1: Vector2<T>, p2: Vector2<T>, p3: Vector2<T>, eps: T) -> bool
where
    T: Real,
{
    cross_product(p1, p2, p3).abs() <= eps
}

/// Intersect the infinite lines through `ln1a -> ln1b` and `ln2a -> ln2b`.
///
/// Returns `None` if the lines are parallel. The result is clamped to the first segment's end
/// points when the intersect parameter falls outside of it.
///
/// # Examples
///
/// ```
/// # use vatti_clip::core::math::*;
/// let p = segment_intersect_pt(vec2(0.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0), vec2(10.0, 0.0));
/// assert_eq!(p, Some(vec2(5.0, 5.0)));
/// let parallel = segment_intersect_pt(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0), vec2(1.0, 1.0));
/// assert_eq!(parallel, None);
/// ```
pub fn segment_intersect_pt<T>(
    ln1a: Vector2<T>,
    ln1b: Vector2<T>,
    ln2a: Vector2<T>,
    ln2b: Vector2<T>,
) -> Option<Vector2<T>>
where
    T: Real,
{
    let dy1 = ln1b.y - ln1a.y;
    let dx1 = ln1b.x - ln1a.x;
    let dy2 = ln2b.y - ln2a.y;
    let dx2 = ln2b.x - ln2a.x;
    let det = dy1 * dx2 - dy2 * dx1;
    if det == T::zero() {
        return None;
    }

    let t = ((ln1a.x - ln2a.x) * dy2 - (ln1a.y - ln2a.y) * dx2) / det;
    let result = if t <= T::zero() {
        ln1a
    } else if t >= T::one() {
        ln1b
    } else {
        Vector2::new(ln1a.x + t * dx1, ln1a.y + t * dy1)
    };

    Some(result)
}

/// Returns `true` if segment `seg1a -> seg1b` crosses segment `seg2a -> seg2b`.
///
/// If `inclusive` is false then touching at end points or collinear overlap is not an
/// intersect. If `inclusive` is true then touching counts but fully collinear segments still do
/// not.
pub fn segments_intersect<T>(
    seg1a: Vector2<T>,
    seg1b: Vector2<T>,
    seg2a: Vector2<T>,
    seg2b: Vector2<T>,
    inclusive: bool,
) -> bool
where
    T: Real,
{
    let res1 = cross_product(seg1a, seg2a, seg2b);
    let res2 = cross_product(seg1b, seg2a, seg2b);
    let res3 = cross_product(seg2a, seg1a, seg1b);
    let res4 = cross_product(seg2b, seg1a, seg1b);
    if !inclusive {
        return res1 * res2 < T::zero() && res3 * res4 < T::zero();
    }

    if res1 * res2 > T::zero() || res3 * res4 > T::zero() {
        return false;
    }

    res1 != T::zero() || res2 != T::zero() || res3 != T::zero() || res4 != T::zero()
}

/// Closest point to `pt` on the segment `seg1 -> seg2`.
///
/// # Examples
///
/// ```
/// # use vatti_clip::core::math::*;
/// let p = closest_pt_on_segment(vec2(5.0, 5.0), vec2(0.0, 0.0), vec2(10.0, 0.0));
/// assert_eq!(p, vec2(5.0, 0.0));
/// let clamped = closest_pt_on_segment(vec2(-5.0, 5.0), vec2(0.0, 0.0), vec2(10.0, 0.0));
/// assert_eq!(clamped, vec2(0.0, 0.0));
/// ```
pub fn closest_pt_on_segment<T>(pt: Vector2<T>, seg1: Vector2<T>, seg2: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    if seg1 == seg2 {
        return seg1;
    }

    let d = seg2 - seg1;
    let t = (pt - seg1).dot(d) / d.length_squared();
    let q = num_traits::real::Real::min(num_traits::real::Real::max(t, T::zero()), T::one());

    Vector2::new(seg1.x + q * d.x, seg1.y + q * d.y)
}

/// Squared perpendicular distance from `pt` to the infinite line through `line1` and `line2`.
///
/// Returns zero if `line1` and `line2` are the same point.
pub fn perpendicular_dist_sq<T>(pt: Vector2<T>, line1: Vector2<T>, line2: Vector2<T>) -> T
where
    T: Real,
{
    let d = line2 - line1;
    let len_sq = d.length_squared();
    if len_sq == T::zero() {
        return T::zero();
    }

    let c = (pt - line1).perp_dot(d);
    c * c / len_sq
}
