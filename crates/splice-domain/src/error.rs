//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Splice
#[derive(Error, Debug)]
pub enum Error {
    /// A resolver's requested type has no satisfying provider chain
    #[error("Failed to resolve type {type_name} for {resolver} in {component}")]
    UnresolvedType {
        /// Component declaring the resolver
        component: String,
        /// Resolver method name
        resolver: String,
        /// Rendered requested type
        type_name: String,
    },

    /// A resolver's requested type has more than one satisfying provider chain
    #[error(
        "Type {type_name} for {resolver} in {component} cannot be resolved unambiguously ({candidates} candidates)"
    )]
    AmbiguousType {
        /// Component declaring the resolver
        component: String,
        /// Resolver method name
        resolver: String,
        /// Rendered requested type
        type_name: String,
        /// Number of candidate plans found
        candidates: usize,
    },

    /// The chosen plan needs asynchronous production but the resolver is synchronous
    #[error("Type {type_name} for {resolver} in {component} cannot be resolved synchronously")]
    AsyncMismatch {
        /// Component declaring the resolver
        component: String,
        /// Resolver method name
        resolver: String,
        /// Rendered requested type
        type_name: String,
    },

    /// Declaration manifest is malformed or references unknown declarations
    #[error("Manifest error: {message}")]
    Manifest {
        /// Description of the manifest problem
        message: String,
    },

    /// A type expression in the manifest could not be parsed
    #[error("Invalid type expression `{expression}` at offset {position}: {message}")]
    TypeSyntax {
        /// The offending expression
        expression: String,
        /// Byte offset of the failure
        position: usize,
        /// What was expected
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create an unresolved type error
    pub fn unresolved_type<C, R, T>(component: C, resolver: R, type_name: T) -> Self
    where
        C: Into<String>,
        R: Into<String>,
        T: Into<String>,
    {
        Self::UnresolvedType {
            component: component.into(),
            resolver: resolver.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an ambiguous type error
    pub fn ambiguous_type<C, R, T>(
        component: C,
        resolver: R,
        type_name: T,
        candidates: usize,
    ) -> Self
    where
        C: Into<String>,
        R: Into<String>,
        T: Into<String>,
    {
        Self::AmbiguousType {
            component: component.into(),
            resolver: resolver.into(),
            type_name: type_name.into(),
            candidates,
        }
    }

    /// Create an async mismatch error
    pub fn async_mismatch<C, R, T>(component: C, resolver: R, type_name: T) -> Self
    where
        C: Into<String>,
        R: Into<String>,
        T: Into<String>,
    {
        Self::AsyncMismatch {
            component: component.into(),
            resolver: resolver.into(),
            type_name: type_name.into(),
        }
    }

    /// Whether this error comes from the resolution contract rather than I/O or input
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedType { .. } | Self::AmbiguousType { .. } | Self::AsyncMismatch { .. }
        )
    }
}

// Input error creation methods
impl Error {
    /// Create a manifest error
    pub fn manifest<S: Into<String>>(message: S) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create a type syntax error
    pub fn type_syntax<E: Into<String>, M: Into<String>>(
        expression: E,
        position: usize,
        message: M,
    ) -> Self {
        Self::TypeSyntax {
            expression: expression.into(),
            position,
            message: message.into(),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
