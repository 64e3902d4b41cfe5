use vatti_clip::{reverse_path, Path};

/// Cycles all the point index positions forward by `n`. E.g. index 0 becomes 1, last index becomes
/// 0, etc.
pub fn cycle_start_index_forward(input: &Path<f64>, n: usize) -> Path<f64> {
    assert!(n > 0, "cycling forward by 0 just returns the same path");
    assert!(
        n < input.len(),
        "cycling forward by more than the path length is unnecessary"
    );
    input.iter().cycle().skip(n).take(input.len()).copied().collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPathState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

/// Visit `input` with every start index position, and (if `invert_direction` is true) every start
/// index position of the reversed path.
pub fn visit_modified_paths<F>(input: &Path<f64>, invert_direction: bool, mut visitor: F)
where
    F: FnMut(Path<f64>, ModifiedPathState),
{
    let mut visit_cycles = |path: Path<f64>, inverted_direction: bool| {
        for cycle_position in 1..path.len() {
            visitor(
                cycle_start_index_forward(&path, cycle_position),
                ModifiedPathState {
                    inverted_direction,
                    cycle_position,
                },
            );
        }
        visitor(
            path,
            ModifiedPathState {
                inverted_direction,
                cycle_position: 0,
            },
        );
    };

    visit_cycles(input.clone(), false);
    if invert_direction {
        visit_cycles(reverse_path(input), true);
    }
}
