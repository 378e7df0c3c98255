//! Single-condition evaluation.
//!
//! Every failure mode is fail-closed: an unresolvable variable, an unsupported
//! operator or a non-numeric operand makes the condition false. Nothing here panics.

use crate::domain::context::RequestContext;
use crate::domain::entities::{ConditionOperator, RuleCondition};

/// A value resolved out of the request context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContextValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl ContextValue<'_> {
    /// String form used by the string operators.
    pub fn to_text(&self) -> String {
        match self {
            ContextValue::Text(s) => (*s).to_string(),
            ContextValue::Number(n) => n.to_string(),
        }
    }

    /// Numeric form used by the numeric operators; `NaN` when not a number.
    pub fn to_number(&self) -> f64 {
        match self {
            ContextValue::Text(s) => parse_number(s),
            ContextValue::Number(n) => *n,
        }
    }
}

/// Resolves a dotted variable path such as `geo.country` against the context.
///
/// Returns `None` for unknown paths and for optional signals that are absent.
pub fn resolve_variable<'a>(variable: &str, context: &'a RequestContext) -> Option<ContextValue<'a>> {
    let (category, field) = variable.split_once('.')?;

    match (category, field) {
        ("device", "type") => Some(ContextValue::Text(&context.device.device_type)),
        ("device", "os") => Some(ContextValue::Text(&context.device.os)),
        ("device", "browser") => Some(ContextValue::Text(&context.device.browser)),
        ("geo", "country") => context.geo.country.as_deref().map(ContextValue::Text),
        ("geo", "region") => context.geo.region.as_deref().map(ContextValue::Text),
        ("geo", "city") => context.geo.city.as_deref().map(ContextValue::Text),
        ("time", "hour") => Some(ContextValue::Number(f64::from(context.time.hour))),
        ("time", "day") => Some(ContextValue::Number(f64::from(context.time.day))),
        ("time", "month") => Some(ContextValue::Number(f64::from(context.time.month))),
        ("http", "language") => Some(ContextValue::Text(&context.http.language)),
        ("http", "referrer") => context.http.referrer.as_deref().map(ContextValue::Text),
        ("random", "percent") => Some(ContextValue::Number(context.random.percent)),
        ("query", name) => context
            .http
            .query
            .get(name)
            .map(|v| ContextValue::Text(v.as_str())),
        _ => None,
    }
}

/// Evaluates one condition against the context.
pub fn evaluate_condition(condition: &RuleCondition, context: &RequestContext) -> bool {
    let Some(actual) = resolve_variable(&condition.variable, context) else {
        return false;
    };

    compare(condition.operator, &actual, &condition.value)
}

fn compare(operator: ConditionOperator, actual: &ContextValue<'_>, expected: &str) -> bool {
    match operator {
        ConditionOperator::Equals => lower(actual) == expected.to_lowercase(),
        ConditionOperator::NotEquals => lower(actual) != expected.to_lowercase(),
        ConditionOperator::Contains => lower(actual).contains(&expected.to_lowercase()),
        ConditionOperator::NotContains => !lower(actual).contains(&expected.to_lowercase()),
        ConditionOperator::In => in_list(&lower(actual), expected),
        ConditionOperator::NotIn => !in_list(&lower(actual), expected),
        ConditionOperator::Gt => actual.to_number() > parse_number(expected),
        ConditionOperator::Gte => actual.to_number() >= parse_number(expected),
        ConditionOperator::Lt => actual.to_number() < parse_number(expected),
        ConditionOperator::Lte => actual.to_number() <= parse_number(expected),
        ConditionOperator::Between => {
            let (min, max) = parse_range(expected);
            let n = actual.to_number();
            n >= min && n <= max
        }
        ConditionOperator::Unsupported => false,
    }
}

fn lower(value: &ContextValue<'_>) -> String {
    value.to_text().to_lowercase()
}

fn in_list(actual: &str, expected: &str) -> bool {
    expected
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .any(|item| item == actual)
}

/// Splits `min-max` on `-`. Missing bounds are `NaN`, so the range never matches.
pub(crate) fn parse_range(expected: &str) -> (f64, f64) {
    let mut bounds = expected.split('-').map(parse_number);
    let min = bounds.next().unwrap_or(f64::NAN);
    let max = bounds.next().unwrap_or(f64::NAN);
    (min, max)
}

/// Parses a finite decimal number, yielding `NaN` on failure.
pub(crate) fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(f64::NAN)
}
