//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`GenerationService`] | Load the graph, plan every component, emit the files |

/// Generation run orchestration
pub mod generation_service;

pub use generation_service::{GenerationReport, GenerationService, generate_implementations};
