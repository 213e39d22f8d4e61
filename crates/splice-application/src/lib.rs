//! Application Layer - Splice
//!
//! Resolution and code generation for the Splice dependency-injection
//! planner.
//!
//! ## Architecture
//!
//! The application layer:
//! - Implements the planning pipeline as plain functions over the domain graph
//! - Orchestrates a generation run through the domain ports
//! - Has no dependencies on infrastructure or I/O
//!
//! ## Pipeline
//!
//! Graph → [`TypeResolver`] → [`ResolutionAggregator`] →
//! [`ImplementationGenerator`] → [`ImplementationEmitter`](splice_domain::ImplementationEmitter)
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `splice-domain`: graph, type model, plans and ports
//! - `rayon` for resolving components in parallel and `tracing` for diagnostics

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
