//! Reftrace: syntactic API-usage tracer for JavaScript
//!
//! This library answers "does this program use API X.Y.Z, however it was
//! aliased, destructured, re-exported, or re-assigned?" by walking a
//! program's AST and scope information against a caller-supplied trace map
//! of property paths, reporting every location where a specified path is
//! read, called, or constructed.

pub mod analyze;
pub mod cli;
pub mod error;
pub mod trace_map;
pub mod tracker;

pub use error::{Error, Result};
pub use trace_map::{AccessKind, TraceMap, TraceMatch};
pub use tracker::{
    default_global_object_names, ConstantKeyRules, InteropMode, ReferenceTracker, TrackerOptions,
};

// Re-export the analysis entry point for callers starting from source text
pub use analyze::analyze;
