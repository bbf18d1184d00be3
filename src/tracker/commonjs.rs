//! CommonJS entry strategy
//!
//! Roots the trace at `require("...")` calls. Only the undeclared, truly
//! global `require` binding is trusted; a file that declares its own
//! `require` gets no CommonJS matches. The call's return value is then
//! treated exactly like an imported module binding: the module map's read
//! marker reports the call itself, and property matching continues from
//! the call expression.

use super::propagate::emit;
use super::{keys, resolver, MapRef, ReferenceTracker};
use crate::trace_map::{AccessKind, TraceMap, TraceMatch};
use oxc_ast::AstKind;
use oxc_span::GetSpan;

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    pub(crate) fn trace_commonjs_into<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let semantic = self.semantic;
        let Some(require) = resolver::undeclared_global(semantic, "require") else {
            log::debug!("require is declared in this file, skipping CommonJS strategy");
            return;
        };

        for node_id in resolver::read_reference_node_ids(semantic, &require) {
            // Only references that are directly the callee count; passing
            // `require` around as a value is not a module load.
            let Some(parent) = resolver::parent_of(semantic, node_id) else {
                continue;
            };
            let AstKind::CallExpression(call) = parent.kind() else {
                continue;
            };
            let node = semantic.nodes().get_node(node_id);
            if call.callee.span() != node.kind().span() {
                continue;
            }
            let Some(argument) = call.arguments.first().and_then(|arg| arg.as_expression()) else {
                continue;
            };
            let Some(module_id) = keys::resolve_constant_string(argument, self.options.key_rules)
            else {
                continue;
            };
            let Some((canonical, module_map)) = trace_map.children.get_key_value(module_id.as_ref())
            else {
                continue;
            };

            log::debug!("require(\"{module_id}\") keys the trace map");
            let mut path = vec![canonical.as_str()];
            if let Some(entry) = module_map.read.as_ref() {
                emit(parent, &path, AccessKind::Read, entry, sink);
            }
            self.propagate_property_references(parent, &mut path, MapRef::Node(module_map), sink);
        }
    }
}
