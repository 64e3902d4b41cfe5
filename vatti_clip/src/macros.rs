/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing path macros. Used for extracting macro repetition count for
/// reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a path with the points given as a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use vatti_clip::*;
/// let square = path![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// assert_eq!(square.len(), 4);
/// assert_eq!(square[2], vec2(10.0, 10.0));
/// ```
#[macro_export]
macro_rules! path {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut p: $crate::path::Path<_> = Vec::with_capacity(size);
            $(
                p.push($crate::core::math::Vector2::new($x.0, $x.1));
            )*
            p
        }
    };
}
