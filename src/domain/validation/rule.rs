//! Rule vocabulary and the textual rule grammar.
//!
//! Rule sets are written as pipe-separated tokens, e.g.
//! `"required|string|min:3|max:50"`. Parameterized rules use `name:param`.
//! The grammar is decoded once into [`Rule`] values so that request-time
//! evaluation never compares rule names.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while decoding a rule declaration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleParseError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` requires a parameter")]
    MissingParameter { rule: String },

    #[error("rule `{rule}` does not take a parameter")]
    UnexpectedParameter { rule: String },

    #[error("invalid parameter `{param}` for rule `{rule}`")]
    InvalidParameter { rule: String, param: String },

    #[error("empty rule token")]
    EmptyToken,

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<RuleParseError>,
    },

    #[error("field `{0}` declared more than once")]
    DuplicateField(String),
}

/// Named format checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Spanish national identity document: eight digits plus control letter
    Dni,
    /// International or national phone number
    Phone,
    /// Login name: 4 to 50 ASCII letters, digits or underscores
    Username,
}

impl FromStr for PatternKind {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dni" => Ok(PatternKind::Dni),
            "phone" | "telefono" => Ok(PatternKind::Phone),
            "username" => Ok(PatternKind::Username),
            other => Err(RuleParseError::InvalidParameter {
                rule: "pattern".to_string(),
                param: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Dni => write!(f, "dni"),
            PatternKind::Phone => write!(f, "phone"),
            PatternKind::Username => write!(f, "username"),
        }
    }
}

/// A single constraint on a field
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    TypeString,
    TypeInt,
    TypeFloat,
    TypeBoolean,
    Email,
    /// Lower bound: numeric when the field is numeric, character count otherwise
    Min(f64),
    /// Upper bound: numeric when the field is numeric, character count otherwise
    Max(f64),
    Pattern(PatternKind),
    /// `YYYY-MM-DD`, strict
    DateOnly,
    DateTime,
    /// Case-sensitive membership
    OneOf(Vec<String>),
}

impl Rule {
    /// Decode one grammar token (`max:50`, `in:A,B`, `required`, ...)
    pub fn parse_token(token: &str) -> Result<Self, RuleParseError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RuleParseError::EmptyToken);
        }

        let (name, param) = match token.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (token, None),
        };

        let rule = match name {
            "required" => Rule::Required,
            "string" => Rule::TypeString,
            "int" | "integer" => Rule::TypeInt,
            "float" | "numeric" => Rule::TypeFloat,
            "boolean" | "bool" => Rule::TypeBoolean,
            "email" => Rule::Email,
            "dni" => Rule::Pattern(PatternKind::Dni),
            "phone" | "telefono" => Rule::Pattern(PatternKind::Phone),
            "username" => Rule::Pattern(PatternKind::Username),
            "date" => Rule::DateOnly,
            "datetime" => Rule::DateTime,
            "min" => return Ok(Rule::Min(Self::bound(name, param)?)),
            "max" => return Ok(Rule::Max(Self::bound(name, param)?)),
            "pattern" => {
                let kind = param.ok_or_else(|| RuleParseError::MissingParameter {
                    rule: name.to_string(),
                })?;
                return Ok(Rule::Pattern(kind.parse()?));
            }
            "in" => return Ok(Rule::OneOf(Self::allowed_values(name, param)?)),
            other => return Err(RuleParseError::UnknownRule(other.to_string())),
        };

        if param.is_some() {
            return Err(RuleParseError::UnexpectedParameter {
                rule: name.to_string(),
            });
        }
        Ok(rule)
    }

    /// Whether this rule is one of the type declarations
    pub fn is_numeric_type(&self) -> bool {
        matches!(self, Rule::TypeInt | Rule::TypeFloat)
    }

    fn bound(name: &str, param: Option<&str>) -> Result<f64, RuleParseError> {
        let param = param.ok_or_else(|| RuleParseError::MissingParameter {
            rule: name.to_string(),
        })?;
        param
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| RuleParseError::InvalidParameter {
                rule: name.to_string(),
                param: param.to_string(),
            })
    }

    fn allowed_values(name: &str, param: Option<&str>) -> Result<Vec<String>, RuleParseError> {
        let param = param.ok_or_else(|| RuleParseError::MissingParameter {
            rule: name.to_string(),
        })?;
        let mut values: Vec<String> = Vec::new();
        for item in param.split(',').map(str::trim) {
            if item.is_empty() {
                return Err(RuleParseError::InvalidParameter {
                    rule: name.to_string(),
                    param: param.to_string(),
                });
            }
            if !values.iter().any(|v| v == item) {
                values.push(item.to_string());
            }
        }
        Ok(values)
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::parse_token(s)
    }
}
