//! Command-line interface
//!
//! Runs the tracer over a single JavaScript file against a JSON trace map
//! and prints the matches as text or JSON.

use crate::analyze;
use crate::error::{Error, Result};
use crate::trace_map::{AccessKind, TraceMap, TraceMatch};
use crate::tracker::{
    default_global_object_names, ConstantKeyRules, InteropMode, ReferenceTracker, TrackerOptions,
};
use clap::{Parser, ValueEnum};
use oxc_allocator::Allocator;
use oxc_span::SourceType;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reftrace")]
#[command(about = "Trace reads, calls, and constructs of specified JavaScript APIs")]
#[command(version)]
pub struct Cli {
    /// Input JavaScript file
    pub input: PathBuf,

    /// JSON trace map describing the property paths to look for
    #[arg(short, long)]
    pub map: PathBuf,

    /// How to parse the input
    #[arg(long, value_enum, default_value = "module")]
    pub source: SourceKind,

    /// CommonJS/ESM interop behavior
    #[arg(long, value_enum, default_value = "strict")]
    pub mode: InteropMode,

    /// Entry strategies to run
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "globals,commonjs,esm"
    )]
    pub strategy: Vec<Strategy>,

    /// Names treated as references to the global object
    #[arg(long, value_delimiter = ',')]
    pub global_names: Option<Vec<String>>,

    /// How far computed property keys are folded into constants
    #[arg(long, value_enum, default_value = "fold-concat")]
    pub key_rules: ConstantKeyRules,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// How the input file is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// ES module
    Module,
    /// Classic script (CommonJS-style)
    Script,
}

/// One entry strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Globals,
    Commonjs,
    Esm,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One match rendered for output
#[derive(Serialize)]
struct MatchReport {
    path: Vec<String>,
    kind: AccessKind,
    start: u32,
    end: u32,
    entry: Value,
}

fn to_report(m: &TraceMatch<'_, Value>) -> MatchReport {
    MatchReport {
        path: m.path.iter().map(|segment| segment.to_string()).collect(),
        kind: m.kind,
        start: m.span.start,
        end: m.span.end,
        entry: m.entry.clone(),
    }
}

/// Run the tracer with the given arguments
pub fn run(cli: Cli) -> Result<()> {
    let source_text = fs::read_to_string(&cli.input)
        .map_err(|err| Error::Io(format!("failed to read {}: {err}", cli.input.display())))?;
    let map_text = fs::read_to_string(&cli.map)
        .map_err(|err| Error::Io(format!("failed to read {}: {err}", cli.map.display())))?;
    let map_json: Value = serde_json::from_str(&map_text).map_err(|err| {
        Error::trace_map(format!("{} is not valid JSON: {err}", cli.map.display()))
    })?;
    let trace_map = TraceMap::from_json(&map_json)?;

    let source_type = match cli.source {
        SourceKind::Module => SourceType::mjs(),
        SourceKind::Script => SourceType::cjs(),
    };
    let allocator = Allocator::default();
    let (_program, semantic) = analyze::analyze(&allocator, &source_text, source_type)?;

    let options = TrackerOptions {
        mode: cli.mode,
        global_object_names: cli
            .global_names
            .clone()
            .unwrap_or_else(default_global_object_names),
        key_rules: cli.key_rules,
    };
    let mut tracker = ReferenceTracker::with_options(&semantic, options);

    let mut reports = Vec::new();
    for strategy in dedup_strategies(&cli.strategy) {
        let matches = match strategy {
            Strategy::Globals => tracker.trace_global_references(&trace_map),
            Strategy::Commonjs => tracker.trace_commonjs_references(&trace_map),
            Strategy::Esm => tracker.trace_esm_references(&trace_map),
        };
        log::debug!("{:?} strategy produced {} matches", strategy, matches.len());
        reports.extend(matches.iter().map(to_report));
    }

    match cli.format {
        OutputFormat::Text => {
            for report in &reports {
                if report.entry.is_null() {
                    println!(
                        "{}\t{}\t@{}..{}",
                        report.kind,
                        report.path.join("."),
                        report.start,
                        report.end
                    );
                } else {
                    println!(
                        "{}\t{}\t@{}..{}\t{}",
                        report.kind,
                        report.path.join("."),
                        report.start,
                        report.end,
                        report.entry
                    );
                }
            }
        }
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&reports)
                .map_err(|err| Error::Io(err.to_string()))?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn dedup_strategies(selected: &[Strategy]) -> Vec<Strategy> {
    let mut out = Vec::new();
    for strategy in selected {
        if !out.contains(strategy) {
            out.push(*strategy);
        }
    }
    out
}
