//! Manifest Tests
//!
//! Tests for manifest decoding, discovery and graph construction.
