#![allow(dead_code)]
mod path_modifiers;
mod paths_test_properties;

pub use path_modifiers::*;
pub use paths_test_properties::*;
