//! Binding pattern unpacking
//!
//! When a traced value is assigned or declared into a binding form, the
//! trace follows it into the variables that form introduces. Object
//! destructuring narrows the map by the destructured key; array and rest
//! forms do not preserve a stable key path and end the trace.
//!
//! Declarations and assignment expressions spell their left-hand sides as
//! two different AST families, so both get an unpacker with the same rules.

use super::resolver;
use super::{keys, MapRef, ReferenceTracker};
use crate::trace_map::{AccessKind, TraceMatch};
use oxc_ast::ast::{
    AssignmentTarget, AssignmentTargetMaybeDefault, AssignmentTargetProperty, BindingPattern,
    BindingPatternKind,
};
use oxc_syntax::{node::NodeId, scope::ScopeId};

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    /// Propagate a trace into the variables bound by a declaration pattern
    pub(crate) fn unpack_binding_pattern<'t, T>(
        &mut self,
        pattern: &BindingPattern<'a>,
        scope_id: ScopeId,
        host: NodeId,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                let binding = resolver::resolve_name(self.semantic, scope_id, ident.name.as_str());
                // Binding a traced value is not itself a read of it; only
                // subsequent reads of the new variable are.
                self.propagate_binding(&binding, path, map, false, sink);
            }
            BindingPatternKind::ObjectPattern(object) => {
                for property in &object.properties {
                    let Some(key) = keys::resolve_property_key(&property.key, self.options.key_rules)
                    else {
                        continue;
                    };
                    let Some((canonical, child)) = map.child(&key) else {
                        continue;
                    };
                    path.push(canonical);
                    if let Some(entry) = child.on_read() {
                        sink(TraceMatch {
                            node_id: host,
                            span: property.span,
                            path: path.clone(),
                            kind: AccessKind::Read,
                            entry,
                        });
                    }
                    self.unpack_binding_pattern(&property.value, scope_id, host, path, child, sink);
                    path.pop();
                }
            }
            BindingPatternKind::AssignmentPattern(assignment) => {
                // The default expression is matched independently if it is
                // itself traced; only the target continues this branch.
                self.unpack_binding_pattern(&assignment.left, scope_id, host, path, map, sink);
            }
            BindingPatternKind::ArrayPattern(_) => {}
        }
    }

    /// Propagate a trace into the variables written by an assignment target
    pub(crate) fn unpack_assignment_target<'t, T>(
        &mut self,
        target: &AssignmentTarget<'a>,
        scope_id: ScopeId,
        host: NodeId,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        match target {
            AssignmentTarget::AssignmentTargetIdentifier(ident) => {
                let binding = resolver::resolve_name(self.semantic, scope_id, ident.name.as_str());
                self.propagate_binding(&binding, path, map, false, sink);
            }
            AssignmentTarget::ObjectAssignmentTarget(object) => {
                for property in &object.properties {
                    match property {
                        AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(shorthand) => {
                            let name = shorthand.binding.name.as_str();
                            let Some((canonical, child)) = map.child(name) else {
                                continue;
                            };
                            path.push(canonical);
                            if let Some(entry) = child.on_read() {
                                sink(TraceMatch {
                                    node_id: host,
                                    span: shorthand.span,
                                    path: path.clone(),
                                    kind: AccessKind::Read,
                                    entry,
                                });
                            }
                            let binding = resolver::resolve_name(self.semantic, scope_id, name);
                            self.propagate_binding(&binding, path, child, false, sink);
                            path.pop();
                        }
                        AssignmentTargetProperty::AssignmentTargetPropertyProperty(keyed) => {
                            let Some(key) =
                                keys::resolve_property_key(&keyed.name, self.options.key_rules)
                            else {
                                continue;
                            };
                            let Some((canonical, child)) = map.child(&key) else {
                                continue;
                            };
                            path.push(canonical);
                            if let Some(entry) = child.on_read() {
                                sink(TraceMatch {
                                    node_id: host,
                                    span: keyed.span,
                                    path: path.clone(),
                                    kind: AccessKind::Read,
                                    entry,
                                });
                            }
                            self.unpack_maybe_default(
                                &keyed.binding,
                                scope_id,
                                host,
                                path,
                                child,
                                sink,
                            );
                            path.pop();
                        }
                    }
                }
            }
            // Array targets, member targets and the rest do not preserve a
            // stable key path.
            _ => {}
        }
    }

    fn unpack_maybe_default<'t, T>(
        &mut self,
        target: &AssignmentTargetMaybeDefault<'a>,
        scope_id: ScopeId,
        host: NodeId,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        match target {
            AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(with_default) => {
                self.unpack_assignment_target(&with_default.binding, scope_id, host, path, map, sink);
            }
            other => {
                if let Some(target) = other.as_assignment_target() {
                    self.unpack_assignment_target(target, scope_id, host, path, map, sink);
                }
            }
        }
    }
}
