//! Domain layer constants
//!
//! Naming and layout conventions of generated code. Downstream consumers rely
//! on these values, so changing any of them changes the persisted output.

// ============================================================================
// TYPE MODEL CONSTANTS
// ============================================================================

/// Name of the unordered unique-element container aggregated by the set rule
pub const SET_CONTAINER_NAME: &str = "Set";

/// Name of the asynchronous-result wrapper marking deferred production
pub const ASYNC_WRAPPER_NAME: &str = "Promise";

/// Generic spelling of array types in type expressions (`Array<T>`)
pub const ARRAY_CONTAINER_NAME: &str = "Array";

// ============================================================================
// GENERATED CODE CONSTANTS
// ============================================================================

/// Directory segment inserted between a component's source directory and its base name
pub const GENERATED_DIR_SEGMENT: &str = "gen";

/// Suffix appended to a component name to form the generated class name
pub const IMPLEMENTATION_SUFFIX: &str = "Impl";

/// Prefix of module instance fields and of every generated accessor
pub const MEMBER_PREFIX: &str = "_";

/// Infix of set accessor names (`_<Module>_synthetic_<n>`)
pub const SYNTHETIC_ACCESSOR_PREFIX: &str = "synthetic_";

/// Extension used in generated import specifiers
pub const IMPORT_EXTENSION: &str = "js";
