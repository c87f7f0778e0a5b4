pub mod core;
pub mod diagnostic;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod input;
pub mod path;
pub mod process;
pub mod shell;
