//! Rule evaluation against an untyped input record.

use super::checks;
use super::errors::FieldErrors;
use super::messages;
use super::rule::Rule;
use super::rule_set::{FieldRules, RuleSet};
use serde_json::{Map, Value};

/// Result of validating one input record.
///
/// Exactly one branch is produced: either every declared field is clean, or
/// the error map describes every violation and no coerced value is exposed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Clean(Map<String, Value>),
    Invalid(FieldErrors),
}

impl ValidationOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, ValidationOutcome::Clean(_))
    }

    pub fn into_result(self) -> Result<Map<String, Value>, FieldErrors> {
        match self {
            ValidationOutcome::Clean(record) => Ok(record),
            ValidationOutcome::Invalid(errors) => Err(errors),
        }
    }
}

/// Validate `input` against `rules`.
///
/// Only declared fields are read; anything else in `input` is dropped.
/// Optional fields that are absent or empty come back as `null`.
pub fn validate(input: &Map<String, Value>, rules: &FieldRules) -> ValidationOutcome {
    let mut errors = FieldErrors::new();
    let mut clean = Map::new();

    for (field, set) in rules.iter() {
        let mut value = input.get(field).cloned().unwrap_or(Value::Null);
        if !set.is_required() && value.as_str() == Some("") {
            value = Value::Null;
        }

        let before = errors.len();
        check_field(field, &value, set, &mut errors);
        if errors.len() == before {
            clean.insert(field.to_string(), coerce(value, set));
        }
    }

    if errors.is_empty() {
        ValidationOutcome::Clean(clean)
    } else {
        ValidationOutcome::Invalid(errors)
    }
}

fn check_field(field: &str, value: &Value, set: &RuleSet, errors: &mut FieldErrors) {
    for rule in set.rules() {
        if value.is_null() && *rule != Rule::Required {
            continue;
        }
        if let Some(message) = violation(field, value, rule, set) {
            errors.push(field, message);
        }
    }
}

fn violation(field: &str, value: &Value, rule: &Rule, set: &RuleSet) -> Option<String> {
    let text = checks::text_of(value);
    let failed = match rule {
        Rule::Required => checks::is_blank(value),
        Rule::TypeString => !value.is_string(),
        Rule::TypeInt => checks::int_of(value).is_none(),
        Rule::TypeFloat => checks::float_of(value).is_none(),
        Rule::TypeBoolean => checks::bool_of(value).is_none(),
        Rule::Email => !text.as_deref().is_some_and(checks::is_email),
        Rule::Min(bound) => return below(field, value, *bound, set),
        Rule::Max(bound) => return above(field, value, *bound, set),
        Rule::Pattern(kind) => !text.as_deref().is_some_and(|t| checks::matches_pattern(*kind, t)),
        Rule::DateOnly => !text.as_deref().is_some_and(checks::is_date),
        Rule::DateTime => !text.as_deref().is_some_and(checks::is_datetime),
        Rule::OneOf(allowed) => !text
            .as_deref()
            .is_some_and(|t| allowed.iter().any(|candidate| candidate == t)),
    };

    failed.then(|| message_for(field, rule))
}

/// Numeric fields compare values; a non-numeric value is left to the type rule.
fn below(field: &str, value: &Value, bound: f64, set: &RuleSet) -> Option<String> {
    if set.is_numeric() {
        let n = checks::float_of(value)?;
        (n < bound).then(|| messages::min_value(field, bound))
    } else {
        let fails = checks::char_len(value).map_or(true, |len| (len as f64) < bound);
        fails.then(|| messages::min_length(field, bound))
    }
}

fn above(field: &str, value: &Value, bound: f64, set: &RuleSet) -> Option<String> {
    if set.is_numeric() {
        let n = checks::float_of(value)?;
        (n > bound).then(|| messages::max_value(field, bound))
    } else {
        let fails = checks::char_len(value).map_or(true, |len| (len as f64) > bound);
        fails.then(|| messages::max_length(field, bound))
    }
}

fn message_for(field: &str, rule: &Rule) -> String {
    match rule {
        Rule::Required => messages::required(field),
        Rule::TypeString => messages::string(field),
        Rule::TypeInt => messages::int(field),
        Rule::TypeFloat => messages::float(field),
        Rule::TypeBoolean => messages::boolean(field),
        Rule::Email => messages::email(field),
        Rule::Min(bound) => messages::min_length(field, *bound),
        Rule::Max(bound) => messages::max_length(field, *bound),
        Rule::Pattern(kind) => messages::pattern(field, *kind),
        Rule::DateOnly => messages::date(field),
        Rule::DateTime => messages::datetime(field),
        Rule::OneOf(allowed) => messages::one_of(field, allowed),
    }
}

/// Apply type coercions in fixed order: string, int, float, boolean
fn coerce(value: Value, set: &RuleSet) -> Value {
    if value.is_null() {
        return value;
    }
    let mut value = value;
    if set.declares(&Rule::TypeString) {
        if let Value::String(s) = &value {
            value = Value::String(checks::sanitize_string(s));
        }
    }
    if set.declares(&Rule::TypeInt) {
        if let Some(n) = checks::int_of(&value) {
            value = Value::from(n);
        }
    }
    if set.declares(&Rule::TypeFloat) {
        if let Some(n) = checks::float_of(&value) {
            value = checks::float_value(n);
        }
    }
    if set.declares(&Rule::TypeBoolean) {
        if let Some(b) = checks::bool_of(&value) {
            value = Value::Bool(b);
        }
    }
    value
}
