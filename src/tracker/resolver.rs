//! Variable resolution over the scope graph
//!
//! Maps identifier names to the binding that governs them by walking the
//! lexical scope chain, mirroring standard shadowing rules. Names that no
//! scope binds resolve to an undeclared-global key whose references live in
//! the scope graph's root unresolved-reference table; a name present there
//! and absent from the root scope's bindings is exactly a "truly global,
//! undeclared in this file" name.

use oxc_semantic::{AstNode, Semantic};
use oxc_syntax::{node::NodeId, scope::ScopeId, symbol::SymbolId};

/// Identity of a propagation root: a declared symbol or an undeclared
/// global name
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindingKey {
    Symbol(SymbolId),
    Global(String),
}

/// Resolve a name from the given scope outward, first hit wins
pub(crate) fn resolve_name(semantic: &Semantic, from_scope: ScopeId, name: &str) -> BindingKey {
    let scoping = semantic.scoping();
    let mut scope = Some(from_scope);
    while let Some(scope_id) = scope {
        if let Some(symbol_id) = scoping.get_binding(scope_id, name) {
            return BindingKey::Symbol(symbol_id);
        }
        scope = scoping.scope_parent_id(scope_id);
    }
    BindingKey::Global(name.to_string())
}

/// Look up a truly-global binding: a name with no declaration in the root
/// scope. Returns `None` when a root-scope declaration shadows the global.
pub(crate) fn undeclared_global(semantic: &Semantic, name: &str) -> Option<BindingKey> {
    let scoping = semantic.scoping();
    if scoping.get_binding(scoping.root_scope_id(), name).is_some() {
        log::debug!("global name {name} is declared locally, skipping");
        return None;
    }
    Some(BindingKey::Global(name.to_string()))
}

/// Nodes of all read references of a binding, in source order. Write-only
/// references are assignment targets and are handled through pattern
/// unpacking instead.
pub(crate) fn read_reference_node_ids(semantic: &Semantic, key: &BindingKey) -> Vec<NodeId> {
    let scoping = semantic.scoping();
    match key {
        BindingKey::Symbol(symbol_id) => scoping
            .get_resolved_references(*symbol_id)
            .filter(|reference| reference.flags().is_read())
            .map(|reference| reference.node_id())
            .collect(),
        BindingKey::Global(name) => scoping
            .root_unresolved_references()
            .get(name.as_str())
            .map(|reference_ids| {
                reference_ids
                    .iter()
                    .filter_map(|reference_id| {
                        let reference = scoping.get_reference(*reference_id);
                        reference.flags().is_read().then(|| reference.node_id())
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Node that declared a symbol (e.g. the import specifier that introduced
/// an imported binding)
pub(crate) fn declaration_node(semantic: &Semantic, symbol_id: SymbolId) -> NodeId {
    semantic.scoping().symbol_declaration(symbol_id)
}

/// Parent of a node in the AST, or `None` at the program root
pub(crate) fn parent_of<'s, 'a>(
    semantic: &'s Semantic<'a>,
    node_id: NodeId,
) -> Option<&'s AstNode<'a>> {
    let parent = semantic.nodes().parent_node(node_id);
    (parent.id() != node_id).then_some(parent)
}
