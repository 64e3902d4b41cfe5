use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};
use vatti_clip::*;
use test_paths::*;

fn bench_boolean_op(b: &mut Bencher, clip_type: ClipType, subjects: &Paths<f64>, clips: &Paths<f64>) {
    b.iter(|| boolean_op(clip_type, FillRule::NonZero, subjects, clips).unwrap())
}

fn union_circles_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("union_circles");
    for &count in &[4, 8, 16] {
        let circles = circle_grid(count, 10.0, 64);
        group.bench_with_input(BenchmarkId::new("grid", count), &circles, |b, circles| {
            bench_boolean_op(b, ClipType::Union, circles, &Vec::new())
        });
    }

    group.finish();
}

fn intersect_stars_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect_stars");
    for &point_count in &[50, 500, 5000] {
        let subjects = vec![star(vec2(0.0, 0.0), 100.0, 40.0, point_count)];
        let clips = vec![star(vec2(15.0, 10.0), 100.0, 40.0, point_count)];
        group.bench_with_input(
            BenchmarkId::new("points", point_count),
            &(subjects, clips),
            |b, (subjects, clips)| bench_boolean_op(b, ClipType::Intersection, subjects, clips),
        );
    }

    group.finish();
}

fn self_intersects_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_self_intersects");
    for &crossings in &[25, 250, 2500] {
        let subjects = vec![pathological_zig_zag::<f64>(crossings)];
        group.bench_with_input(
            BenchmarkId::new("zig_zag", crossings),
            &subjects,
            |b, subjects| {
                b.iter(|| union_subjects(subjects, FillRule::EvenOdd).unwrap());
            },
        );
    }

    group.finish();
}

fn tree_output_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_output");
    for &count in &[4, 16] {
        // concentric rings produce deeply nested output
        let rings: Paths<f64> = (1..=count)
            .map(|i| ellipse(vec2(0.0, 0.0), 5.0 * i as f64, 5.0 * i as f64, 64))
            .collect();
        group.bench_with_input(BenchmarkId::new("concentric", count), &rings, |b, rings| {
            b.iter(|| boolean_op_tree(ClipType::Union, FillRule::EvenOdd, rings, &Vec::new()).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    clipping,
    union_circles_group,
    intersect_stars_group,
    self_intersects_group,
    tree_output_group,
);
criterion_main!(clipping);
