//! Trace map model
//!
//! A trace map is the caller-supplied specification of which property paths
//! to look for. It is a tree keyed by property names; any node can carry a
//! payload for reads, calls, or constructor invocations of that path. The
//! payload type is opaque to the engine and is handed back verbatim in each
//! reported match.

pub mod json;

use indexmap::IndexMap;
use oxc_span::Span;
use oxc_syntax::node::NodeId;
use serde::Serialize;

/// How a traced path was accessed at a match site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// The value of the path was read
    Read,
    /// The path was invoked as a function
    Call,
    /// The path was invoked as a constructor
    Construct,
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessKind::Read => write!(f, "read"),
            AccessKind::Call => write!(f, "call"),
            AccessKind::Construct => write!(f, "construct"),
        }
    }
}

/// One node of a trace map: child paths plus optional access markers
#[derive(Debug, Clone)]
pub struct TraceMap<T> {
    pub(crate) children: IndexMap<String, TraceMap<T>>,
    pub(crate) read: Option<T>,
    pub(crate) call: Option<T>,
    pub(crate) construct: Option<T>,
    pub(crate) esm: bool,
}

impl<T> Default for TraceMap<T> {
    fn default() -> Self {
        TraceMap {
            children: IndexMap::new(),
            read: None,
            call: None,
            construct: None,
            esm: false,
        }
    }
}

impl<T> TraceMap<T> {
    /// Create an empty trace map node
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child path under the given property name
    pub fn with_child(mut self, name: impl Into<String>, child: TraceMap<T>) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Report reads of this path with the given payload
    pub fn on_read(mut self, entry: T) -> Self {
        self.read = Some(entry);
        self
    }

    /// Report calls of this path with the given payload
    pub fn on_call(mut self, entry: T) -> Self {
        self.call = Some(entry);
        self
    }

    /// Report constructor invocations of this path with the given payload
    pub fn on_construct(mut self, entry: T) -> Self {
        self.construct = Some(entry);
        self
    }

    /// Mark this map as already having ES module shape (named exports as
    /// top-level keys). Meaningful only at the root of a per-module map;
    /// maps without this flag get CommonJS-style default-export interop
    /// when matched against `import` syntax.
    pub fn esm_shaped(mut self) -> Self {
        self.esm = true;
        self
    }

    /// Child node for a property name, if that path is specified
    pub fn child(&self, name: &str) -> Option<&TraceMap<T>> {
        self.children.get(name)
    }

    /// Iterate over the child property names and nodes, in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &TraceMap<T>)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Payload for reads of this path, if present
    pub fn read(&self) -> Option<&T> {
        self.read.as_ref()
    }

    /// Payload for calls of this path, if present
    pub fn call(&self) -> Option<&T> {
        self.call.as_ref()
    }

    /// Payload for constructor invocations of this path, if present
    pub fn construct(&self) -> Option<&T> {
        self.construct.as_ref()
    }

    /// Whether this map is flagged as ES-module shaped
    pub fn is_esm_shaped(&self) -> bool {
        self.esm
    }
}

/// One reported occurrence of a traced path being read, called, or
/// constructed
#[derive(Debug)]
pub struct TraceMatch<'t, T> {
    /// The most specific AST node enclosing the access
    pub node_id: NodeId,
    /// Source span of that node
    pub span: Span,
    /// Property names traversed from the entry point
    pub path: Vec<&'t str>,
    /// How the path was accessed
    pub kind: AccessKind,
    /// The marker payload found at the path's trace map node
    pub entry: &'t T,
}

impl<'t, T> Clone for TraceMatch<'t, T> {
    fn clone(&self) -> Self {
        TraceMatch {
            node_id: self.node_id,
            span: self.span,
            path: self.path.clone(),
            kind: self.kind,
            entry: self.entry,
        }
    }
}

impl<'t, T> TraceMatch<'t, T> {
    /// The traversed path joined with dots, e.g. `console.log`
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_nests_children() {
        let map: TraceMap<u32> = TraceMap::new()
            .with_child("console", TraceMap::new().with_child("log", TraceMap::new().on_call(1)));
        let console = map.child("console").unwrap();
        let log = console.child("log").unwrap();
        assert_eq!(log.call(), Some(&1));
        assert_eq!(log.read(), None);
        assert!(map.child("process").is_none());
    }

    #[test]
    fn test_children_preserve_insertion_order() {
        let map: TraceMap<()> = TraceMap::new()
            .with_child("b", TraceMap::new())
            .with_child("a", TraceMap::new())
            .with_child("c", TraceMap::new());
        let names: Vec<&str> = map.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_esm_flag() {
        let map: TraceMap<()> = TraceMap::new().esm_shaped();
        assert!(map.is_esm_shaped());
        assert!(!TraceMap::<()>::new().is_esm_shaped());
    }
}
