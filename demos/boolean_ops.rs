use vatti_clip::{
    boolean_op, core::traits::FuzzyEq, path, paths_area, reverse_path, union_subjects, ClipType,
    Clipper, ClipperOptions, FillRule, Paths,
};

fn main() {
    // set RUST_LOG=debug to see the clipper session log output
    env_logger::init();

    basic_operations();
    fill_rules();
    self_intersects();
    reversed_output();
}

fn basic_operations() {
    println!("Testing basic boolean operations...");

    let square1: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
    let square2 = vec![path![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)]];

    let expected = [
        (ClipType::Intersection, 25.0),
        (ClipType::Union, 175.0),
        (ClipType::Difference, 75.0),
        (ClipType::Xor, 150.0),
    ];

    for (clip_type, expected_area) in expected {
        let result = boolean_op(clip_type, FillRule::NonZero, &square1, &square2)
            .expect("clipping overlapping squares should succeed");
        let area = paths_area(&result);
        assert!(
            area.fuzzy_eq(expected_area),
            "{:?} area should be {}",
            clip_type,
            expected_area
        );
        log::info!("{:?} produced {} path(s)", clip_type, result.len());
        println!("{:?} of overlapping squares: area = {:.2}", clip_type, area);
    }

    println!("Basic operations completed successfully!\n");
}

fn fill_rules() {
    println!("Testing fill rules...");

    // two overlapping squares, second wound clockwise
    let subjects: Paths<f64> = vec![
        path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        reverse_path(&path![(5.0, 0.0), (15.0, 0.0), (15.0, 10.0), (5.0, 10.0)]),
    ];

    for fill_rule in [
        FillRule::EvenOdd,
        FillRule::NonZero,
        FillRule::Positive,
        FillRule::Negative,
    ] {
        let result = union_subjects(&subjects, fill_rule).expect("union should succeed");
        println!(
            "{:?} fill rule: {} path(s), area = {:.2}",
            fill_rule,
            result.len(),
            paths_area(&result)
        );
    }

    println!("Fill rules completed successfully!\n");
}

fn self_intersects() {
    println!("Testing self intersecting input...");

    let bowtie: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]];
    let result = union_subjects(&bowtie, FillRule::EvenOdd).expect("union should succeed");
    assert!(
        result.iter().all(|p| vatti_clip::is_positive(p)),
        "all output paths should be counter clockwise"
    );
    println!(
        "Bowtie resolved into {} path(s), area = {:.2}",
        result.len(),
        paths_area(&result)
    );

    println!("Self intersects completed successfully!\n");
}

fn reversed_output() {
    println!("Testing reversed output orientation...");

    let mut options = ClipperOptions::<f64>::new();
    options.reverse_solution = true;
    let mut clipper = Clipper::with_options(options).expect("options should be valid");
    clipper.add_subject(&vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]]);
    let solution = clipper
        .execute(ClipType::Union, FillRule::NonZero)
        .expect("union should succeed");
    let area = paths_area(&solution.closed);
    assert!(area.fuzzy_eq(-100.0), "reversed output should be clockwise");
    println!("Reversed union area = {:.2}", area);

    println!("Reversed output completed successfully!\n");
}
