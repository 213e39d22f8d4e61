//! # Domain Layer
//!
//! Core types for the Splice dependency-injection planner. Nothing in this
//! crate performs I/O: it describes the declaration graph, the type model the
//! resolver matches against, the resolution plans it produces, and the
//! declarative class description handed to emission.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | Declaration [`Graph`] and per-component [`Resolution`] plans |
//! | [`value_objects`] | Type descriptors, identifiers, class descriptions |
//! | [`ports`] | Boundaries to the declaration extractor and the emitter |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Naming and layout conventions of generated code |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::*;
pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
