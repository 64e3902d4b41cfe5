mod test_utils;

use test_utils::{create_property_set, property_sets_match, PathProperties};
use vatti_clip::{
    assert_fuzzy_eq, core::traits::FuzzyEq, path, paths_area, paths_bounds, translate_paths,
    ClipError, ClipType, Clipper, ClipperOptions, FillRule, Path, PathType, ReusableData,
};

fn square(x: f64, y: f64, size: f64) -> Path<f64> {
    path![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
}

#[test]
fn session_reused_across_operations() {
    let mut clipper = Clipper::new();
    clipper.add_subject(&vec![square(0.0, 0.0, 10.0)]);
    clipper.add_clip(&vec![square(5.0, 5.0, 10.0)]);

    let expected_areas = [
        (ClipType::Intersection, 25.0),
        (ClipType::Union, 175.0),
        (ClipType::Difference, 75.0),
        (ClipType::Xor, 150.0),
        // executing twice yields the same result
        (ClipType::Intersection, 25.0),
    ];
    for (op, area) in expected_areas {
        let solution = clipper.execute(op, FillRule::NonZero).unwrap();
        assert_fuzzy_eq!(paths_area(&solution.closed), area);
        assert!(solution.open.is_empty());
    }

    // paths added after executing take part in the next execution
    clipper.add_subject(&vec![square(20.0, 20.0, 5.0)]);
    let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
    assert_eq!(solution.closed.len(), 2);
    assert_fuzzy_eq!(paths_area(&solution.closed), 200.0);

    clipper.clear();
    assert!(clipper.is_empty());
    let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
    assert!(solution.closed.is_empty());
}

#[test]
fn reusable_data_matches_direct_input() {
    let subjects = vec![square(0.0, 0.0, 10.0), square(30.0, 0.0, 10.0)];
    let clips = vec![square(5.0, -5.0, 30.0)];

    let mut direct = Clipper::new();
    direct.add_subject(&subjects);
    direct.add_clip(&clips);
    let expected = direct
        .execute(ClipType::Difference, FillRule::NonZero)
        .unwrap();

    let mut subject_data = ReusableData::new();
    subject_data.add_paths(&subjects, PathType::Subject, false);
    let mut clip_data = ReusableData::new();
    clip_data.add_paths(&clips, PathType::Clip, false);

    // both added to one session, order of addition does not matter
    let mut clipper = Clipper::new();
    clipper.add_reusable_data(&clip_data);
    clipper.add_reusable_data(&subject_data);
    let result = clipper
        .execute(ClipType::Difference, FillRule::NonZero)
        .unwrap();

    assert!(property_sets_match(
        &create_property_set(&result.closed),
        &create_property_set(&expected.closed)
    ));
    assert!(property_sets_match(
        &create_property_set(&result.closed),
        &[
            PathProperties::new(4, 50.0, 0.0, 0.0, 5.0, 10.0),
            PathProperties::new(4, 50.0, 35.0, 0.0, 40.0, 10.0),
        ]
    ));

    // same data reused in another session with extra input
    let mut clipper = Clipper::new();
    clipper.add_reusable_data(&subject_data);
    clipper.add_clip(&vec![square(-100.0, -100.0, 500.0)]);
    let result = clipper
        .execute(ClipType::Intersection, FillRule::NonZero)
        .unwrap();
    assert_fuzzy_eq!(paths_area(&result.closed), 200.0);
}

#[test]
fn invalid_options_rejected() {
    let mut options = ClipperOptions::<f64>::new();
    options.eps = -1.0;
    assert!(matches!(
        Clipper::with_options(options),
        Err(ClipError::InvalidTolerance { name: "eps", .. })
    ));

    let mut options = ClipperOptions::<f64>::new();
    options.min_split_area = f64::INFINITY;
    assert!(matches!(
        Clipper::with_options(options),
        Err(ClipError::InvalidTolerance {
            name: "min_split_area",
            ..
        })
    ));

    let mut options = ClipperOptions::<f64>::new();
    options.precision = Some(-9);
    assert_eq!(
        Clipper::with_options(options).unwrap_err(),
        ClipError::PrecisionOutOfRange(-9)
    );
    assert!(options.set_precision(8).is_ok());
    assert!(Clipper::with_options(options).is_ok());

    let err = ClipperOptions::<f64>::with_precision(12).unwrap_err();
    assert_eq!(
        err.to_string(),
        "precision 12 is out of range, must be between -8 and 8"
    );
}

#[test]
fn precision_rounds_input() {
    let options = ClipperOptions::<f64>::with_precision(1).unwrap();
    let mut clipper = Clipper::with_options(options).unwrap();
    clipper.add_subject(&vec![path![
        (0.04, -0.04),
        (10.01, 0.03),
        (9.98, 10.04),
        (0.02, 9.96)
    ]]);

    let bounds = clipper.bounds().unwrap();
    assert_fuzzy_eq!(bounds.min_x, 0.0);
    assert_fuzzy_eq!(bounds.min_y, 0.0);
    assert_fuzzy_eq!(bounds.max_x, 10.0);
    assert_fuzzy_eq!(bounds.max_y, 10.0);

    let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
    assert!(property_sets_match(
        &create_property_set(&solution.closed),
        &[PathProperties::new(4, 100.0, 0.0, 0.0, 10.0, 10.0)]
    ));
}

#[test]
fn session_bounds_cover_all_input() {
    let subjects = vec![square(0.0, 0.0, 10.0)];
    let clips = translate_paths(&subjects, -20.0, 35.0);
    let mut clipper = Clipper::new();
    clipper.add_subject(&subjects);
    clipper.add_clip(&clips);
    clipper.add_open_subject(&vec![path![(50.0, -3.0), (60.0, 0.0)]]);

    let bounds = clipper.bounds().unwrap();
    assert_fuzzy_eq!(bounds.min_x, -20.0);
    assert_fuzzy_eq!(bounds.min_y, -3.0);
    assert_fuzzy_eq!(bounds.max_x, 60.0);
    assert_fuzzy_eq!(bounds.max_y, 45.0);

    let closed_bounds = paths_bounds(&clips).unwrap();
    assert_fuzzy_eq!(closed_bounds.min_y, 35.0);
}

#[test]
fn degenerate_input_ignored() {
    let mut clipper = Clipper::new();
    clipper.add_subject(&vec![
        // single point after duplicate removal
        path![(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)],
        // flat
        path![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)],
        Vec::new(),
    ]);
    assert!(clipper.is_empty());
    let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
    assert!(solution.closed.is_empty());
}

#[test]
fn generic_over_f32() {
    let a: Vec<Path<f32>> = vec![path![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]];
    let b: Vec<Path<f32>> = vec![path![(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]];
    let mut clipper = Clipper::<f32>::new();
    clipper.add_subject(&a);
    clipper.add_clip(&b);
    let solution = clipper
        .execute(ClipType::Intersection, FillRule::NonZero)
        .unwrap();
    assert_eq!(solution.closed.len(), 1);
    assert!((paths_area(&solution.closed) - 4.0).abs() < 1e-5);
}

#[cfg(feature = "serde")]
#[test]
fn options_serde_round_trip() {
    let mut options = ClipperOptions::<f64>::new();
    options.reverse_solution = true;
    options.precision = Some(2);
    let json = serde_json::to_string(&options).unwrap();
    assert!(json.contains("\"reverseSolution\":true"));
    assert!(json.contains("\"minSplitArea\""));
    let parsed: ClipperOptions<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, options);

    let json = serde_json::to_string(&FillRule::NonZero).unwrap();
    assert_eq!(json, "\"nonZero\"");
}
