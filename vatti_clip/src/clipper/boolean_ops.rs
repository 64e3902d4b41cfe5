//! One shot boolean operations which create a [Clipper] session, execute it, and return the
//! closed output paths.
use super::{ClipError, ClipType, Clipper, FillRule, PolyTree};
use crate::{
    core::traits::Real,
    path::{Path, Paths},
};

/// Perform `clip_type` between closed `subjects` and closed `clips`.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let a: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
/// let b = vec![path![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]];
/// let result = boolean_op(ClipType::Xor, FillRule::NonZero, &a, &b).unwrap();
/// assert!((paths_area(&result) - 150.0).abs() < 1e-9);
/// ```
pub fn boolean_op<T>(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &[Path<T>],
    clips: &[Path<T>],
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    let mut clipper = Clipper::new();
    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    Ok(clipper.execute(clip_type, fill_rule)?.closed)
}

/// Same as [boolean_op] but returns the output nested by containment.
pub fn boolean_op_tree<T>(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &[Path<T>],
    clips: &[Path<T>],
) -> Result<PolyTree<T>, ClipError>
where
    T: Real,
{
    let mut clipper = Clipper::new();
    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    Ok(clipper.execute_tree(clip_type, fill_rule)?.tree)
}

/// Regions covered by both `subjects` and `clips`.
#[inline]
pub fn intersect<T>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    boolean_op(ClipType::Intersection, fill_rule, subjects, clips)
}

/// Regions covered by `subjects` or `clips`.
#[inline]
pub fn union<T>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    boolean_op(ClipType::Union, fill_rule, subjects, clips)
}

/// Union of `subjects` alone, useful for resolving self intersects and overlaps.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// // self intersecting figure eight with lobes wound in opposite directions
/// let bowtie: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]];
/// let result = union_subjects(&bowtie, FillRule::EvenOdd).unwrap();
/// assert!(result.iter().all(|p| path_area(p) > 0.0));
/// assert!((paths_area(&result) - 50.0).abs() < 1e-9);
/// ```
#[inline]
pub fn union_subjects<T>(
    subjects: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    boolean_op(ClipType::Union, fill_rule, subjects, &[])
}

/// Regions covered by `subjects` but not `clips`.
#[inline]
pub fn difference<T>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    boolean_op(ClipType::Difference, fill_rule, subjects, clips)
}

/// Regions covered by `subjects` or `clips` but not both.
#[inline]
pub fn xor<T>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>, ClipError>
where
    T: Real,
{
    boolean_op(ClipType::Xor, fill_rule, subjects, clips)
}
