//! Global-object entry strategy
//!
//! Roots the trace at bindings that are truly global: names the program
//! uses without declaring anywhere. A top-level map key roots a keyed
//! trace at the same-named global; the configured global-object alias
//! names (`window` and friends) root the whole map instead, since the
//! global object itself is only interesting through its properties.

use super::{resolver, MapRef, ReferenceTracker};
use crate::trace_map::{TraceMap, TraceMatch};

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    pub(crate) fn trace_globals_into<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        log::debug!(
            "tracing global references for {} top-level paths",
            trace_map.children.len()
        );
        let semantic = self.semantic;

        for (key, child) in &trace_map.children {
            let Some(binding) = resolver::undeclared_global(semantic, key) else {
                continue;
            };
            let mut path = vec![key.as_str()];
            self.propagate_binding(&binding, &mut path, MapRef::Node(child), true, sink);
        }

        let alias_names = self.options.global_object_names.clone();
        for alias in &alias_names {
            let Some(binding) = resolver::undeclared_global(semantic, alias) else {
                continue;
            };
            let mut path = Vec::new();
            self.propagate_binding(&binding, &mut path, MapRef::Node(trace_map), false, sink);
        }
    }
}
