use vatti_clip::{
    boolean_op_tree, core::Control, path, path_area, reverse_path, ClipType, FillRule, Paths,
    PolyTree,
};

fn main() {
    env_logger::init();

    // square with a square hole, a square island in the hole, and a separate triangle
    let subjects: Paths<f64> = vec![
        path![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        reverse_path(&path![(20.0, 20.0), (80.0, 20.0), (80.0, 80.0), (20.0, 80.0)]),
        path![(40.0, 40.0), (60.0, 40.0), (60.0, 60.0), (40.0, 60.0)],
        path![(150.0, 0.0), (200.0, 0.0), (175.0, 50.0)],
    ];
    let clips = vec![path![(-10.0, 50.0), (210.0, 50.0), (210.0, 120.0), (-10.0, 120.0)]];

    for clip_type in [ClipType::Union, ClipType::Difference] {
        let tree = boolean_op_tree(clip_type, FillRule::NonZero, &subjects, &clips)
            .expect("clipping should succeed");
        log::info!("{:?} tree holds {} polygon(s)", clip_type, tree.len());
        println!("{:?}:", clip_type);
        print!("{}", tree);
        println!("total area = {:.2}", tree.area());

        tree.visit_depth_first(|node| {
            println!(
                "level {} {} area = {:.2}",
                node.level(),
                if node.is_hole() { "hole" } else { "polygon" },
                path_area(node.polygon())
            );
        });

        // find the first hole, if any
        let first_hole = tree.visit_depth_first(|node| {
            if node.is_hole() {
                return Control::Break(node.polygon().len());
            }
            Control::Continue
        });
        match first_hole {
            Control::Break(count) => println!("first hole has {} points\n", count),
            Control::Continue => println!("no holes\n"),
        }
    }

    let empty = PolyTree::<f64>::new();
    assert!(empty.is_empty());
}
