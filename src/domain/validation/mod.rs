//! Declarative input validation
//!
//! Field rules are declared in a compact grammar (`"required|string|max:50"`)
//! or with the [`RuleSet`] builder, decoded once, and evaluated against
//! untyped JSON records to produce either a clean, coerced record or the full
//! map of violations.

mod checks;
mod errors;
mod messages;
pub mod rule;
pub mod rule_set;
pub mod validator;

pub use errors::FieldErrors;
pub use rule::{PatternKind, Rule, RuleParseError};
pub use rule_set::{FieldRules, RuleSet};
pub use validator::{validate, ValidationOutcome};
