//! Constant property-key resolution
//!
//! Bracket-notation member keys, computed destructuring keys, and
//! `require()` arguments participate in matching only when they can be
//! resolved to a compile-time-constant string. How far that resolution
//! goes is an explicit, configurable capability rather than an incidental
//! detail, because the edge cases are easy to get subtly wrong.

use std::borrow::Cow;

use oxc_ast::ast::{BinaryExpression, Expression, PropertyKey, TemplateLiteral};
use oxc_syntax::operator::BinaryOperator;

/// Rules for folding computed keys into constant strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConstantKeyRules {
    /// String literals, substitution-free template literals, and numeric
    /// literals only
    Literals,
    /// Additionally fold `+` concatenation chains whose operands are
    /// themselves literal
    #[default]
    FoldConcat,
}

/// Resolve an expression to a constant string key, or `None` if it is not
/// compile-time constant under the given rules
pub(crate) fn resolve_constant_string<'a>(
    expr: &Expression<'a>,
    rules: ConstantKeyRules,
) -> Option<Cow<'a, str>> {
    match expr {
        Expression::StringLiteral(lit) => Some(Cow::Borrowed(lit.value.as_str())),
        Expression::TemplateLiteral(template) => resolve_template(template),
        Expression::NumericLiteral(lit) => Some(Cow::Owned(lit.value.to_string())),
        Expression::ParenthesizedExpression(paren) => {
            resolve_constant_string(&paren.expression, rules)
        }
        Expression::BinaryExpression(binary) => resolve_binary(binary, rules),
        _ => None,
    }
}

/// Resolve a property key (static, string, numeric, or computed-constant)
/// to its string form
pub(crate) fn resolve_property_key<'a>(
    key: &PropertyKey<'a>,
    rules: ConstantKeyRules,
) -> Option<Cow<'a, str>> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(Cow::Borrowed(ident.name.as_str())),
        // Private names cannot appear in a trace map.
        PropertyKey::PrivateIdentifier(_) => None,
        PropertyKey::StringLiteral(lit) => Some(Cow::Borrowed(lit.value.as_str())),
        PropertyKey::TemplateLiteral(template) => resolve_template(template),
        PropertyKey::NumericLiteral(lit) => Some(Cow::Owned(lit.value.to_string())),
        PropertyKey::ParenthesizedExpression(paren) => {
            resolve_constant_string(&paren.expression, rules)
        }
        PropertyKey::BinaryExpression(binary) => resolve_binary(binary, rules),
        _ => None,
    }
}

fn resolve_template<'a>(template: &TemplateLiteral<'a>) -> Option<Cow<'a, str>> {
    if !template.expressions.is_empty() || template.quasis.len() != 1 {
        return None;
    }
    template
        .quasis
        .first()
        .and_then(|quasi| quasi.value.cooked.as_ref())
        .map(|cooked| Cow::Borrowed(cooked.as_str()))
}

fn resolve_binary<'a>(
    binary: &BinaryExpression<'a>,
    rules: ConstantKeyRules,
) -> Option<Cow<'a, str>> {
    if rules != ConstantKeyRules::FoldConcat || binary.operator != BinaryOperator::Addition {
        return None;
    }
    let left = resolve_constant_string(&binary.left, rules)?;
    let right = resolve_constant_string(&binary.right, rules)?;
    Some(Cow::Owned(format!("{left}{right}")))
}
