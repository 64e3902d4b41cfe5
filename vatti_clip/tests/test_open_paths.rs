use vatti_clip::{
    assert_fuzzy_eq, core::traits::FuzzyEq, path, paths_area, vec2, ClipType, Clipper, FillRule,
    Path, PathType, Vector2,
};

fn square(x: f64, y: f64, size: f64) -> Path<f64> {
    path![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
}

fn clip_line(clip_type: ClipType, line: Path<f64>) -> (Vec<Path<f64>>, Vec<Path<f64>>) {
    let mut clipper = Clipper::new();
    clipper.add_open_subject(&vec![line]);
    clipper.add_clip(&vec![square(0.0, 0.0, 10.0)]);
    let solution = clipper.execute(clip_type, FillRule::NonZero).unwrap();
    (solution.closed, solution.open)
}

/// End points of an open path ordered lexicographically (output direction is not fixed).
fn end_points(path: &[Vector2<f64>]) -> (Vector2<f64>, Vector2<f64>) {
    let a = path[0];
    let b = path[path.len() - 1];
    if a.lex_cmp(&b).is_le() {
        (a, b)
    } else {
        (b, a)
    }
}

fn has_segment(paths: &[Path<f64>], start: Vector2<f64>, end: Vector2<f64>) -> bool {
    paths.iter().any(|p| {
        let (a, b) = end_points(p);
        p.len() == 2 && a.fuzzy_eq(start) && b.fuzzy_eq(end)
    })
}

#[test]
fn line_crossing_square() {
    let line = path![(-5.0, 2.0), (15.0, 12.0)];

    let (closed, open) = clip_line(ClipType::Intersection, line.clone());
    assert!(closed.is_empty());
    assert_eq!(open.len(), 1);
    assert!(has_segment(&open, vec2(0.0, 4.5), vec2(10.0, 9.5)));

    let (closed, open) = clip_line(ClipType::Difference, line.clone());
    assert!(closed.is_empty());
    assert_eq!(open.len(), 2);
    assert!(has_segment(&open, vec2(-5.0, 2.0), vec2(0.0, 4.5)));
    assert!(has_segment(&open, vec2(10.0, 9.5), vec2(15.0, 12.0)));

    let (closed, open) = clip_line(ClipType::Union, line);
    assert_eq!(closed.len(), 1);
    assert_fuzzy_eq!(paths_area(&closed), 100.0);
    assert_eq!(open.len(), 2);
    assert!(has_segment(&open, vec2(-5.0, 2.0), vec2(0.0, 4.5)));
    assert!(has_segment(&open, vec2(10.0, 9.5), vec2(15.0, 12.0)));
}

#[test]
fn line_inside_and_outside() {
    let inside = path![(2.0, 2.0), (8.0, 6.0)];
    let (_, open) = clip_line(ClipType::Intersection, inside.clone());
    assert_eq!(open.len(), 1);
    assert!(has_segment(&open, vec2(2.0, 2.0), vec2(8.0, 6.0)));
    let (_, open) = clip_line(ClipType::Difference, inside);
    assert!(open.is_empty());

    let outside = path![(20.0, 0.0), (30.0, 5.0)];
    let (_, open) = clip_line(ClipType::Intersection, outside.clone());
    assert!(open.is_empty());
    let (_, open) = clip_line(ClipType::Difference, outside);
    assert_eq!(open.len(), 1);
    assert!(has_segment(&open, vec2(20.0, 0.0), vec2(30.0, 5.0)));
}

#[test]
fn polyline_keeps_inner_vertexes() {
    // enters the square, turns at (5, 8), then leaves through the right side
    let line = path![(-2.0, 5.0), (5.0, 8.0), (12.0, 2.0)];
    let (_, open) = clip_line(ClipType::Intersection, line);
    assert_eq!(open.len(), 1);
    let piece = &open[0];
    assert_eq!(piece.len(), 3);
    assert!(piece.iter().any(|p| p.fuzzy_eq(vec2(5.0, 8.0))));
    let (a, b) = end_points(piece);
    assert!(a.fuzzy_eq(vec2(0.0, 5.0 + 6.0 / 7.0)));
    assert!(b.fuzzy_eq(vec2(10.0, 2.0 + 6.0 * 2.0 / 7.0)));
}

#[test]
fn open_clip_paths_are_ignored() {
    let mut clipper = Clipper::new();
    clipper.add_subject(&vec![square(0.0, 0.0, 10.0)]);
    clipper.add_paths(&vec![path![(-5.0, 5.0), (15.0, 5.0)]], PathType::Clip, true);
    let solution = clipper
        .execute(ClipType::Intersection, FillRule::NonZero)
        .unwrap();
    assert!(solution.closed.is_empty());
    assert!(solution.open.is_empty());

    let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
    assert_eq!(solution.closed.len(), 1);
    assert_fuzzy_eq!(paths_area(&solution.closed), 100.0);
    assert!(solution.open.is_empty());
}

#[test]
fn open_output_in_tree_solution() {
    let mut clipper = Clipper::new();
    clipper.add_open_subject(&vec![path![(-5.0, 2.0), (15.0, 12.0)]]);
    clipper.add_clip(&vec![square(0.0, 0.0, 10.0)]);
    let solution = clipper
        .execute_tree(ClipType::Intersection, FillRule::NonZero)
        .unwrap();
    assert!(solution.tree.is_empty());
    assert_eq!(solution.open.len(), 1);
    assert!(has_segment(&solution.open, vec2(0.0, 4.5), vec2(10.0, 9.5)));
}
