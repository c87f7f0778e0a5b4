mod resolver;

pub use resolver::{is_executable, is_searchable_dir, resolve, Resolution};
