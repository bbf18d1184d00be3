//! Source analysis helpers
//!
//! Thin wrappers around the oxc parser and semantic builder for callers that
//! start from raw source text. The tracer itself only consumes the results;
//! it never parses.

use crate::error::{Error, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_semantic::{Semantic, SemanticBuilder};
use oxc_span::SourceType;

/// Parse source text into a program allocated in the given arena
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    source_type: SourceType,
) -> Result<&'a Program<'a>> {
    let ret = Parser::new(allocator, source_text, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::Parse { message });
    }
    Ok(allocator.alloc(ret.program))
}

/// Build semantic information (scopes, symbols, references) for a program
pub fn build_semantic<'a>(program: &'a Program<'a>) -> Result<Semantic<'a>> {
    let ret = SemanticBuilder::new().build(program);
    if !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::Semantic { message });
    }
    Ok(ret.semantic)
}

/// Parse source text and build semantic information in one step
pub fn analyze<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    source_type: SourceType,
) -> Result<(&'a Program<'a>, Semantic<'a>)> {
    let program = parse_program(allocator, source_text, source_type)?;
    let semantic = build_semantic(program)?;
    Ok((program, semantic))
}
