//! Reference tracker
//!
//! The traversal engine that walks a program's semantic information (scope
//! graph plus parent-linked AST nodes) and reports every syntactic location
//! where a path specified in a trace map is read, called, or constructed —
//! however the value was aliased, destructured, or re-assigned along the
//! way.
//!
//! Three entry strategies are available: global bindings, CommonJS
//! `require` calls, and ES module import/export declarations. Each produces
//! its matches in a deterministic depth-first order: entry order, then
//! per-reference order, then per-property recursion order.

mod commonjs;
mod esm;
mod globals;
mod keys;
mod propagate;
mod resolver;
mod unpack;

pub use keys::ConstantKeyRules;

use crate::trace_map::{TraceMap, TraceMatch};
use oxc_semantic::Semantic;
use resolver::BindingKey;

/// How a CommonJS-shaped trace map is exposed to `import` syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InteropMode {
    /// Expose the map both as the implicit default export and flattened
    /// onto the namespace, so `import {foo}` and `import x; x.foo` both
    /// match
    Legacy,
    /// Expose the map only as the default export, and suppress matches for
    /// the bare act of importing without using anything
    #[default]
    Strict,
}

/// Configuration accepted at tracker construction
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    /// CommonJS/ESM interop behavior
    pub mode: InteropMode,
    /// Names treated as references to the global object itself
    pub global_object_names: Vec<String>,
    /// How far computed property keys are folded into constant strings
    pub key_rules: ConstantKeyRules,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        TrackerOptions {
            mode: InteropMode::default(),
            global_object_names: default_global_object_names(),
            key_rules: ConstantKeyRules::default(),
        }
    }
}

/// Conventional names for the global object across host environments
pub fn default_global_object_names() -> Vec<String> {
    vec!["global".to_string(), "self".to_string(), "window".to_string()]
}

/// Traces specified property paths through one program's semantic
/// information.
///
/// A tracker owns the traversal stack used to cut off cyclic alias chains,
/// so one instance must not be shared between concurrent analyses; create
/// one tracker per program.
pub struct ReferenceTracker<'s, 'a> {
    pub(crate) semantic: &'s Semantic<'a>,
    pub(crate) options: TrackerOptions,
    /// Bindings currently being propagated through, to short-circuit
    /// re-entrant propagation such as `let x = x`
    pub(crate) variable_stack: Vec<BindingKey>,
}

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    /// Create a tracker with default options
    pub fn new(semantic: &'s Semantic<'a>) -> Self {
        Self::with_options(semantic, TrackerOptions::default())
    }

    /// Create a tracker with explicit options
    pub fn with_options(semantic: &'s Semantic<'a>, options: TrackerOptions) -> Self {
        ReferenceTracker {
            semantic,
            options,
            variable_stack: Vec::new(),
        }
    }

    /// Trace accesses reached through undeclared global bindings and
    /// through the configured global-object alias names
    pub fn trace_global_references<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
    ) -> Vec<TraceMatch<'t, T>> {
        let mut matches = Vec::new();
        self.trace_globals_into(trace_map, &mut |m| matches.push(m));
        matches
    }

    /// Trace accesses reached through `require("...")` calls of the
    /// undeclared global `require`
    pub fn trace_commonjs_references<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
    ) -> Vec<TraceMatch<'t, T>> {
        let mut matches = Vec::new();
        self.trace_commonjs_into(trace_map, &mut |m| matches.push(m));
        matches
    }

    /// Trace accesses reached through top-level `import` and
    /// `export ... from` declarations whose module specifier keys the map
    pub fn trace_esm_references<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
    ) -> Vec<TraceMatch<'t, T>> {
        let mut matches = Vec::new();
        self.trace_esm_into(trace_map, &mut |m| matches.push(m));
        matches
    }
}

/// View over a trace map node used during propagation.
///
/// The wrapped variants implement default-export interop for CommonJS-shaped
/// module maps without materializing a new map: `DefaultOnly` exposes the
/// inner map solely under the `default` key, `DefaultAndNamed` under
/// `default` and flattened onto the top level at once.
pub(crate) enum MapRef<'t, T> {
    Node(&'t TraceMap<T>),
    DefaultOnly(&'t TraceMap<T>),
    DefaultAndNamed(&'t TraceMap<T>),
}

impl<T> Clone for MapRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MapRef<'_, T> {}

impl<'t, T> MapRef<'t, T> {
    /// Look up a child path, returning the canonical key string alongside it
    pub(crate) fn child(self, key: &str) -> Option<(&'t str, MapRef<'t, T>)> {
        match self {
            MapRef::Node(map) => map
                .children
                .get_key_value(key)
                .map(|(name, child)| (name.as_str(), MapRef::Node(child))),
            MapRef::DefaultOnly(map) => {
                (key == "default").then_some(("default", MapRef::Node(map)))
            }
            MapRef::DefaultAndNamed(map) => {
                // An explicit `default` child of the module map wins over
                // the synthetic default export.
                if let Some((name, child)) = map.children.get_key_value(key) {
                    return Some((name.as_str(), MapRef::Node(child)));
                }
                (key == "default").then_some(("default", MapRef::Node(map)))
            }
        }
    }

    pub(crate) fn on_read(self) -> Option<&'t T> {
        match self {
            MapRef::Node(map) | MapRef::DefaultAndNamed(map) => map.read.as_ref(),
            MapRef::DefaultOnly(_) => None,
        }
    }

    pub(crate) fn on_call(self) -> Option<&'t T> {
        match self {
            MapRef::Node(map) | MapRef::DefaultAndNamed(map) => map.call.as_ref(),
            MapRef::DefaultOnly(_) => None,
        }
    }

    pub(crate) fn on_construct(self) -> Option<&'t T> {
        match self {
            MapRef::Node(map) | MapRef::DefaultAndNamed(map) => map.construct.as_ref(),
            MapRef::DefaultOnly(_) => None,
        }
    }
}
