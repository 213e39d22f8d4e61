//! Arena identifiers
//!
//! Every declaration in a [`Graph`](crate::entities::Graph) lives in a vector
//! owned by the graph; these newtypes are indexes into those vectors. They are
//! only minted by the graph builder, so indexing with them never goes out of
//! bounds for the graph that produced them.

use serde::Serialize;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the declaration in its arena
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// Identifies a module declaration
    ModuleId
);

arena_id!(
    /// Identifies a provider declaration (unique across all modules)
    ProviderId
);

arena_id!(
    /// Identifies a component declaration
    ComponentId
);

/// Synthetic identity of one set aggregation
///
/// Set resolutions are never merged, so each one produced by the resolver
/// gets a fresh identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SetId(pub usize);
