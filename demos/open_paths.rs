use vatti_clip::{path, paths_area, ClipType, Clipper, FillRule, Paths};

fn main() {
    env_logger::init();

    let square: Paths<f64> = vec![path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
    let lines = vec![
        path![(-5.0, 2.0), (15.0, 12.0)],
        path![(-2.0, 5.0), (5.0, 8.0), (12.0, 2.0)],
        path![(20.0, 0.0), (30.0, 5.0)],
    ];

    let mut clipper = Clipper::new();
    clipper.add_open_subject(&lines);
    clipper.add_clip(&square);

    for clip_type in [ClipType::Intersection, ClipType::Difference, ClipType::Union] {
        let solution = clipper
            .execute(clip_type, FillRule::NonZero)
            .expect("clipping should succeed");
        log::info!(
            "{:?}: {} closed, {} open path(s)",
            clip_type,
            solution.closed.len(),
            solution.open.len()
        );
        println!("{:?}:", clip_type);
        println!("  closed area = {:.2}", paths_area(&solution.closed));
        for line in &solution.open {
            let pts: Vec<String> = line
                .iter()
                .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
                .collect();
            println!("  open: {}", pts.join(" -> "));
        }
    }
}
