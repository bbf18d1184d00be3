//! Reference propagation
//!
//! The core traversal: follow every read reference of a binding up through
//! the expressions that wrap it, match property accesses against the trace
//! map, report marked accesses, and spill into newly bound variables
//! whenever the traced value is assigned or destructured somewhere else.

use super::resolver::{self, BindingKey};
use super::{keys, MapRef, ReferenceTracker};
use crate::trace_map::{AccessKind, TraceMatch};
use oxc_ast::AstKind;
use oxc_semantic::AstNode;
use oxc_span::GetSpan;

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    /// Propagate through every read reference of a binding.
    ///
    /// `should_report` controls whether the bare reads themselves are
    /// reported when the map carries a read marker; propagation into an
    /// alias keeps reporting for property extensions but not for the alias
    /// reads themselves. Re-entrant propagation (cyclic alias chains such
    /// as `let x = x`) is cut off via the traversal stack.
    pub(crate) fn propagate_binding<'t, T>(
        &mut self,
        key: &BindingKey,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        should_report: bool,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        if self.variable_stack.contains(key) {
            log::trace!("binding {key:?} is already being propagated, cutting off");
            return;
        }
        self.variable_stack.push(key.clone());
        let semantic = self.semantic;
        for node_id in resolver::read_reference_node_ids(semantic, key) {
            let node = semantic.nodes().get_node(node_id);
            if should_report {
                if let Some(entry) = map.on_read() {
                    emit(node, path, AccessKind::Read, entry, sink);
                }
            }
            self.propagate_property_references(node, path, map, sink);
        }
        self.variable_stack.pop();
    }

    /// Follow the expression context of `root` upward and match it against
    /// the trace map.
    ///
    /// Transparently wrapped expressions (parenthesization, optional
    /// chains, sequences and the like) do not change which value is being
    /// referenced, so the walk climbs until the parent is a structurally
    /// significant kind and only then decides what the access means.
    pub(crate) fn propagate_property_references<'t, T>(
        &mut self,
        root: &AstNode<'a>,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let semantic = self.semantic;
        let mut node = root;
        let mut parent = match resolver::parent_of(semantic, node.id()) {
            Some(parent) => parent,
            None => return,
        };
        while !is_sentinel(parent.kind()) {
            node = parent;
            parent = match resolver::parent_of(semantic, parent.id()) {
                Some(parent) => parent,
                None => return,
            };
        }

        let node_span = node.kind().span();
        match parent.kind() {
            AstKind::StaticMemberExpression(member) => {
                if member.object.span() == node_span {
                    self.match_member_key(parent, member.property.name.as_str(), path, map, sink);
                }
            }
            AstKind::ComputedMemberExpression(member) => {
                if member.object.span() == node_span {
                    if let Some(key) =
                        keys::resolve_constant_string(&member.expression, self.options.key_rules)
                    {
                        self.match_member_key(parent, &key, path, map, sink);
                    }
                }
            }
            // Private names cannot be specified in a trace map.
            AstKind::PrivateFieldExpression(_) => {}
            AstKind::CallExpression(call) => {
                if call.callee.span() == node_span {
                    if let Some(entry) = map.on_call() {
                        emit(parent, path, AccessKind::Call, entry, sink);
                    }
                }
            }
            AstKind::NewExpression(new_expr) => {
                if new_expr.callee.span() == node_span {
                    if let Some(entry) = map.on_construct() {
                        emit(parent, path, AccessKind::Construct, entry, sink);
                    }
                }
            }
            AstKind::AssignmentExpression(assignment) => {
                if assignment.right.span() == node_span {
                    // The traced value flows into whatever the left side
                    // binds, and the assignment expression itself still
                    // evaluates to it, so both directions continue.
                    self.unpack_assignment_target(
                        &assignment.left,
                        parent.scope_id(),
                        parent.id(),
                        path,
                        map,
                        sink,
                    );
                    self.propagate_property_references(parent, path, map, sink);
                }
            }
            AstKind::AssignmentPattern(pattern) => {
                if pattern.right.span() == node_span {
                    self.unpack_binding_pattern(
                        &pattern.left,
                        parent.scope_id(),
                        parent.id(),
                        path,
                        map,
                        sink,
                    );
                }
            }
            AstKind::AssignmentTargetWithDefault(target) => {
                if target.init.span() == node_span {
                    self.unpack_assignment_target(
                        &target.binding,
                        parent.scope_id(),
                        parent.id(),
                        path,
                        map,
                        sink,
                    );
                }
            }
            AstKind::VariableDeclarator(declarator) => {
                if declarator
                    .init
                    .as_ref()
                    .is_some_and(|init| init.span() == node_span)
                {
                    self.unpack_binding_pattern(
                        &declarator.id,
                        parent.scope_id(),
                        parent.id(),
                        path,
                        map,
                        sink,
                    );
                }
            }
            _ => {}
        }
    }

    /// Extend the path by a resolved member key and keep climbing from the
    /// member expression. An unknown key ends the branch: the value now
    /// being accessed is off the specified map.
    fn match_member_key<'t, T>(
        &mut self,
        member_node: &AstNode<'a>,
        key: &str,
        path: &mut Vec<&'t str>,
        map: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let Some((canonical, child)) = map.child(key) else {
            return;
        };
        path.push(canonical);
        if let Some(entry) = child.on_read() {
            emit(member_node, path, AccessKind::Read, entry, sink);
        }
        self.propagate_property_references(member_node, path, child, sink);
        path.pop();
    }
}

/// Report a match at the given node
pub(crate) fn emit<'t, T>(
    node: &AstNode<'_>,
    path: &[&'t str],
    kind: AccessKind,
    entry: &'t T,
    sink: &mut dyn FnMut(TraceMatch<'t, T>),
) {
    sink(TraceMatch {
        node_id: node.id(),
        span: node.kind().span(),
        path: path.to_vec(),
        kind,
        entry,
    });
}

/// Kinds that end the climb past transparent wrappers: the statement and
/// declaration forms a value expression can sit in, the expression forms
/// whose child position decides what an access means, and the binding
/// positions a traced value can flow into.
fn is_sentinel(kind: AstKind) -> bool {
    matches!(
        kind,
        AstKind::Program(_)
            | AstKind::ExpressionStatement(_)
            | AstKind::BlockStatement(_)
            | AstKind::ReturnStatement(_)
            | AstKind::IfStatement(_)
            | AstKind::ForStatement(_)
            | AstKind::WhileStatement(_)
            | AstKind::VariableDeclaration(_)
            | AstKind::FunctionBody(_)
            | AstKind::ArrayExpression(_)
            | AstKind::ArrowFunctionExpression(_)
            | AstKind::AssignmentExpression(_)
            | AstKind::CallExpression(_)
            | AstKind::Class(_)
            | AstKind::Function(_)
            | AstKind::StaticMemberExpression(_)
            | AstKind::ComputedMemberExpression(_)
            | AstKind::PrivateFieldExpression(_)
            | AstKind::NewExpression(_)
            | AstKind::ObjectExpression(_)
            | AstKind::AssignmentPattern(_)
            | AstKind::AssignmentTargetWithDefault(_)
            | AstKind::VariableDeclarator(_)
    )
}
