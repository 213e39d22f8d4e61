//! Emission of generated files

pub mod emitters;
pub mod printer;

pub use emitters::{FileSystemEmitter, InMemoryEmitter, StdoutEmitter};
pub use printer::{render, render_expression};
