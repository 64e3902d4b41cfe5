use vatti_clip::{core::traits::FuzzyEq, path_area, path_bounds, Path, AABB};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a path for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct PathProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub extents: AABB<f64>,
}

impl PathProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-6;

    pub fn new(
        vertex_count: usize,
        area: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_path(path: &Path<f64>) -> Self {
        Self {
            vertex_count: path.len(),
            area: path_area(path),
            extents: path_bounds(path).unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

pub fn create_property_set<'a, I>(paths: I) -> Vec<PathProperties>
where
    I: IntoIterator<Item = &'a Path<f64>>,
{
    paths.into_iter().map(PathProperties::from_path).collect()
}

pub fn property_sets_match(result_set: &[PathProperties], expected_set: &[PathProperties]) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, PathProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Total area of all paths compared with a tolerance relative to the expected magnitude.
pub fn total_area_eq(paths: &[Path<f64>], expected: f64) -> bool {
    let area: f64 = paths.iter().map(|p| path_area(p)).sum();
    let eps = 1e-7 * expected.abs().max(1.0);
    let result = area.fuzzy_eq_eps(expected, eps);
    if !result {
        eprintln!("total area: {}, expected: {}", area, expected);
    }
    result
}
