//! Value interpretation, format checks and coercions used by the validator.

use super::rule::PatternKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;
use validator::ValidateEmail;

/// Control letters indexed by `dni_number mod 23`
const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

static DNI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}[A-Z]$").expect("dni pattern is valid"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,3}\d{8,12}$").expect("phone pattern is valid"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{4,50}$").expect("username pattern is valid"));
static INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("integer pattern is valid"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Scalar rendered as text; `None` for arrays, objects and null
pub(crate) fn text_of(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Missing for the purposes of `required`
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub(crate) fn int_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let s = s.trim();
            if INT_RE.is_match(s) {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

pub(crate) fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Accepts `true`/`false`, `0`/`1` and their string forms
pub(crate) fn bool_of(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Character count (not bytes) of the scalar's text form
pub(crate) fn char_len(value: &Value) -> Option<usize> {
    text_of(value).map(|text| text.chars().count())
}

pub(crate) fn is_email(value: &str) -> bool {
    value.validate_email()
}

pub(crate) fn matches_pattern(kind: PatternKind, value: &str) -> bool {
    match kind {
        PatternKind::Dni => is_valid_dni(value),
        PatternKind::Phone => is_valid_phone(value),
        PatternKind::Username => USERNAME_RE.is_match(value),
    }
}

pub(crate) fn is_valid_dni(value: &str) -> bool {
    let dni = value.trim().to_uppercase();
    if !DNI_RE.is_match(&dni) {
        return false;
    }
    let (digits, letter) = dni.split_at(8);
    let Ok(number) = digits.parse::<u32>() else {
        return false;
    };
    let expected = DNI_LETTERS[(number % 23) as usize];
    letter.as_bytes().first() == Some(&expected)
}

pub(crate) fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&compact)
}

/// Strict `YYYY-MM-DD`: the parsed date must format back to the exact input
pub(crate) fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string() == value)
        .unwrap_or(false)
}

pub(crate) fn is_datetime(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    DATETIME_FORMATS.iter().any(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .map(|parsed| parsed.format(format).to_string() == value)
            .unwrap_or(false)
    })
}

/// Drop markup tags and C0 control characters, then trim
pub(crate) fn sanitize_string(value: &str) -> String {
    let untagged = TAG_RE.replace_all(value, "");
    let printable: String = untagged.chars().filter(|c| (*c as u32) >= 0x20).collect();
    printable.trim().to_string()
}

pub(crate) fn float_value(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
