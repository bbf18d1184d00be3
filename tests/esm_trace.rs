use oxc_allocator::Allocator;
use oxc_span::SourceType;
use reftrace::{
    analyze, AccessKind, InteropMode, ReferenceTracker, TraceMap, TrackerOptions,
};

type Reported = (Vec<String>, AccessKind, &'static str);

fn trace_esm(source: &str, map: &TraceMap<&'static str>, mode: InteropMode) -> Vec<Reported> {
    let allocator = Allocator::default();
    let (_program, semantic) = analyze(&allocator, source, SourceType::mjs()).unwrap();
    let options = TrackerOptions {
        mode,
        ..TrackerOptions::default()
    };
    let mut tracker = ReferenceTracker::with_options(&semantic, options);
    tracker
        .trace_esm_references(map)
        .into_iter()
        .map(|m| {
            (
                m.path.iter().map(|s| s.to_string()).collect(),
                m.kind,
                *m.entry,
            )
        })
        .collect()
}

fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

fn module_map() -> TraceMap<&'static str> {
    TraceMap::new().with_child("m", TraceMap::new().with_child("foo", TraceMap::new().on_read("E")))
}

#[test]
fn test_named_import_matches_like_require_in_legacy_mode() {
    let esm = trace_esm("import { foo } from \"m\"; foo;", &module_map(), InteropMode::Legacy);
    assert_eq!(esm, vec![(path(&["m", "foo"]), AccessKind::Read, "E")]);

    // Same map, CommonJS entry: identical path and entry.
    let allocator = Allocator::default();
    let map = module_map();
    let (_program, semantic) =
        analyze(&allocator, "require(\"m\").foo;", SourceType::cjs()).unwrap();
    let mut tracker = ReferenceTracker::new(&semantic);
    let cjs: Vec<Reported> = tracker
        .trace_commonjs_references(&map)
        .into_iter()
        .map(|m| {
            (
                m.path.iter().map(|s| s.to_string()).collect(),
                m.kind,
                *m.entry,
            )
        })
        .collect();
    assert_eq!(esm, cjs);
}

#[test]
fn test_default_import_member_access() {
    for mode in [InteropMode::Legacy, InteropMode::Strict] {
        let matches = trace_esm("import x from \"m\"; x.foo;", &module_map(), mode);
        assert_eq!(
            matches,
            vec![(path(&["m", "foo"]), AccessKind::Read, "E")],
            "mode: {mode:?}"
        );
    }
}

#[test]
fn test_strict_mode_suppresses_a_bare_default_import() {
    let matches = trace_esm("import x from \"m\";", &module_map(), InteropMode::Strict);
    assert!(matches.is_empty());
}

#[test]
fn test_module_read_marker_reports_the_declaration_once() {
    let map = TraceMap::new().with_child(
        "m",
        TraceMap::new()
            .on_read("module")
            .with_child("foo", TraceMap::new().on_read("E")),
    );
    // In strict mode the bare import reports the module read at the
    // declaration; the synthetic default-export read collapses onto the
    // same path and is dropped as redundant.
    let matches = trace_esm("import x from \"m\";", &map, InteropMode::Strict);
    assert_eq!(matches, vec![(path(&["m"]), AccessKind::Read, "module")]);
}

#[test]
fn test_esm_shaped_map_is_used_as_is() {
    let map = TraceMap::new().with_child(
        "m",
        TraceMap::new()
            .esm_shaped()
            .with_child("default", TraceMap::new().on_read("D"))
            .with_child("foo", TraceMap::new().on_read("F")),
    );
    let matches = trace_esm(
        "import x from \"m\"; import { foo } from \"m\";",
        &map,
        InteropMode::Strict,
    );
    assert_eq!(
        matches,
        vec![
            (path(&["m", "default"]), AccessKind::Read, "D"),
            (path(&["m", "foo"]), AccessKind::Read, "F"),
        ]
    );
}

#[test]
fn test_namespace_import_in_legacy_mode() {
    let matches = trace_esm(
        "import * as ns from \"m\"; ns.foo;",
        &module_map(),
        InteropMode::Legacy,
    );
    assert_eq!(matches, vec![(path(&["m", "foo"]), AccessKind::Read, "E")]);
}

#[test]
fn test_namespace_import_in_strict_mode_goes_through_default() {
    // A CommonJS-shaped module exposes nothing but `default` to a strict
    // namespace import.
    let flat = trace_esm(
        "import * as ns from \"m\"; ns.foo;",
        &module_map(),
        InteropMode::Strict,
    );
    assert!(flat.is_empty());

    let through_default = trace_esm(
        "import * as ns from \"m\"; ns.default.foo;",
        &module_map(),
        InteropMode::Strict,
    );
    assert_eq!(
        through_default,
        vec![(path(&["m", "foo"]), AccessKind::Read, "E")]
    );
}

#[test]
fn test_named_reexport_reports_the_specifier() {
    let matches = trace_esm("export { foo } from \"m\";", &module_map(), InteropMode::Legacy);
    assert_eq!(matches, vec![(path(&["m", "foo"]), AccessKind::Read, "E")]);
}

#[test]
fn test_star_reexport_reports_every_read_marked_key() {
    let map = TraceMap::new().with_child(
        "m",
        TraceMap::new()
            .with_child("foo", TraceMap::new().on_read("F"))
            .with_child("bar", TraceMap::new().on_call("C")),
    );
    let matches = trace_esm("export * from \"m\";", &map, InteropMode::Strict);
    // Only read-marked keys are reportable without per-symbol granularity.
    assert_eq!(matches, vec![(path(&["m", "foo"]), AccessKind::Read, "F")]);
}

#[test]
fn test_unlisted_module_specifier_is_ignored() {
    let matches = trace_esm(
        "import { foo } from \"other\"; foo;",
        &module_map(),
        InteropMode::Legacy,
    );
    assert!(matches.is_empty());
}

#[test]
fn test_destructuring_an_imported_namespace() {
    let matches = trace_esm(
        "import * as ns from \"m\"; const { foo } = ns;",
        &module_map(),
        InteropMode::Legacy,
    );
    assert_eq!(matches, vec![(path(&["m", "foo"]), AccessKind::Read, "E")]);
}
