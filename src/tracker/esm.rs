//! ES module entry strategy
//!
//! Roots the trace at the program's top-level import and re-export
//! declarations, matched purely by their literal module specifier string;
//! nothing is loaded or resolved across files.
//!
//! Module maps without the ESM-shape flag describe a CommonJS export
//! object, which `import` syntax sees through an interop policy: in legacy
//! mode the object doubles as the default export and as the namespace, in
//! strict mode it is the default export only. The synthetic `default` path
//! segment introduced by that wrapping is removed again from reports, and
//! strict mode drops reports that reduce to the bare act of importing.

use super::propagate::emit;
use super::resolver::{self, BindingKey};
use super::{InteropMode, MapRef, ReferenceTracker};
use crate::trace_map::{AccessKind, TraceMap, TraceMatch};
use oxc_ast::ast::{
    BindingIdentifier, ExportAllDeclaration, ExportNamedDeclaration, ImportDeclaration,
    ImportDeclarationSpecifier, ModuleExportName,
};
use oxc_ast::AstKind;
use oxc_semantic::AstNode;
use oxc_span::{GetSpan, Span};
use oxc_syntax::node::NodeId;

impl<'s, 'a> ReferenceTracker<'s, 'a> {
    pub(crate) fn trace_esm_into<'t, T>(
        &mut self,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let semantic = self.semantic;
        for node in semantic.nodes().iter() {
            match node.kind() {
                AstKind::ImportDeclaration(decl) => {
                    self.process_import(node, decl, trace_map, sink);
                }
                AstKind::ExportNamedDeclaration(decl) if decl.source.is_some() => {
                    self.process_reexport(node, decl, trace_map, sink);
                }
                AstKind::ExportAllDeclaration(decl) => {
                    self.process_star_reexport(node, decl, trace_map, sink);
                }
                _ => {}
            }
        }
    }

    fn process_import<'t, T>(
        &mut self,
        node: &AstNode<'a>,
        decl: &ImportDeclaration<'a>,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let Some((module_id, module_map)) = lookup_module(trace_map, decl.source.value.as_str())
        else {
            return;
        };
        log::debug!("import from \"{module_id}\" keys the trace map");
        let mut path = vec![module_id];
        if let Some(entry) = module_map.read.as_ref() {
            emit(node, &path, AccessKind::Read, entry, sink);
        }
        let Some(specifiers) = &decl.specifiers else {
            return;
        };

        let view = self.interop_view(module_map);
        let esm_shaped = module_map.esm;
        let mode = self.options.mode;
        for specifier in specifiers {
            let mut adapted = interop_sink(esm_shaped, mode, &mut *sink);
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                    let external = module_export_name(&spec.imported);
                    self.import_binding(
                        external,
                        spec.span,
                        &spec.local,
                        node.id(),
                        &mut path,
                        view,
                        &mut adapted,
                    );
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                    self.import_binding(
                        "default",
                        spec.span,
                        &spec.local,
                        node.id(),
                        &mut path,
                        view,
                        &mut adapted,
                    );
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                    let binding = self.root_binding(spec.local.name.as_str());
                    self.propagate_binding(&binding, &mut path, view, false, &mut adapted);
                }
            }
        }
    }

    /// A default or named specifier narrows the module map by its external
    /// name and continues through the local binding it introduces
    #[allow(clippy::too_many_arguments)]
    fn import_binding<'t, T>(
        &mut self,
        external: &str,
        specifier_span: Span,
        local: &BindingIdentifier<'a>,
        fallback_node: NodeId,
        path: &mut Vec<&'t str>,
        view: MapRef<'t, T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let Some((canonical, child)) = view.child(external) else {
            return;
        };
        path.push(canonical);
        let binding = self.root_binding(local.name.as_str());
        if let Some(entry) = child.on_read() {
            let node_id = match &binding {
                BindingKey::Symbol(symbol_id) => {
                    resolver::declaration_node(self.semantic, *symbol_id)
                }
                BindingKey::Global(_) => fallback_node,
            };
            sink(TraceMatch {
                node_id,
                span: specifier_span,
                path: path.clone(),
                kind: AccessKind::Read,
                entry,
            });
        }
        self.propagate_binding(&binding, path, child, false, sink);
        path.pop();
    }

    fn process_reexport<'t, T>(
        &mut self,
        node: &AstNode<'a>,
        decl: &ExportNamedDeclaration<'a>,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let Some(source) = decl.source.as_ref() else {
            return;
        };
        let Some((module_id, module_map)) = lookup_module(trace_map, source.value.as_str()) else {
            return;
        };
        let mut path = vec![module_id];
        if let Some(entry) = module_map.read.as_ref() {
            emit(node, &path, AccessKind::Read, entry, sink);
        }

        let view = self.interop_view(module_map);
        let esm_shaped = module_map.esm;
        let mode = self.options.mode;
        for specifier in &decl.specifiers {
            // A re-exported binding is not readable inside this module, so
            // the specifier itself is the whole match.
            let external = module_export_name(&specifier.local);
            let Some((canonical, child)) = view.child(external) else {
                continue;
            };
            path.push(canonical);
            if let Some(entry) = child.on_read() {
                let mut adapted = interop_sink(esm_shaped, mode, &mut *sink);
                adapted(TraceMatch {
                    node_id: node.id(),
                    span: specifier.span,
                    path: path.clone(),
                    kind: AccessKind::Read,
                    entry,
                });
            }
            path.pop();
        }
    }

    fn process_star_reexport<'t, T>(
        &mut self,
        node: &AstNode<'a>,
        decl: &ExportAllDeclaration<'a>,
        trace_map: &'t TraceMap<T>,
        sink: &mut dyn FnMut(TraceMatch<'t, T>),
    ) {
        let Some((module_id, module_map)) = lookup_module(trace_map, decl.source.value.as_str())
        else {
            return;
        };
        let path = vec![module_id];
        if let Some(entry) = module_map.read.as_ref() {
            emit(node, &path, AccessKind::Read, entry, sink);
        }
        // Star re-exports carry no per-symbol granularity; report every
        // read-marked top-level key of the module map at the declaration.
        for (key, child) in &module_map.children {
            if let Some(entry) = child.read.as_ref() {
                let mut keyed = path.clone();
                keyed.push(key.as_str());
                sink(TraceMatch {
                    node_id: node.id(),
                    span: node.kind().span(),
                    path: keyed,
                    kind: AccessKind::Read,
                    entry,
                });
            }
        }
    }

    /// How a module map is exposed to import syntax
    fn interop_view<'t, T>(&self, module_map: &'t TraceMap<T>) -> MapRef<'t, T> {
        if module_map.esm {
            return MapRef::Node(module_map);
        }
        match self.options.mode {
            InteropMode::Legacy => MapRef::DefaultAndNamed(module_map),
            InteropMode::Strict => MapRef::DefaultOnly(module_map),
        }
    }

    fn root_binding(&self, name: &str) -> BindingKey {
        let scoping = self.semantic.scoping();
        resolver::resolve_name(self.semantic, scoping.root_scope_id(), name)
    }
}

fn lookup_module<'t, T>(
    trace_map: &'t TraceMap<T>,
    source: &str,
) -> Option<(&'t str, &'t TraceMap<T>)> {
    trace_map
        .children
        .get_key_value(source)
        .map(|(key, child)| (key.as_str(), child))
}

fn module_export_name<'a>(name: &ModuleExportName<'a>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        ModuleExportName::StringLiteral(lit) => lit.value.as_str(),
    }
}

/// Rewrites reported paths for CommonJS-shaped module maps: the synthetic
/// `default` segment right after the module id is removed, and in strict
/// mode a path that reduces to the module id alone (importing without
/// using anything) is dropped.
fn interop_sink<'x, 't, T>(
    esm_shaped: bool,
    mode: InteropMode,
    sink: &'x mut dyn FnMut(TraceMatch<'t, T>),
) -> impl FnMut(TraceMatch<'t, T>) + 'x {
    move |mut m: TraceMatch<'t, T>| {
        if !esm_shaped {
            if m.path.get(1).copied() == Some("default") {
                m.path.remove(1);
            }
            if mode == InteropMode::Strict && m.path.len() < 2 {
                return;
            }
        }
        sink(m)
    }
}
