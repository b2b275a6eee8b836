use super::rule::{PatternKind, Rule, RuleParseError};
use super::validator::{validate, ValidationOutcome};
use serde_json::{Map, Value};

/// Ordered constraints declared for one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a rule set from the textual grammar.
    ///
    /// An empty definition yields an empty set: the field is accepted as-is.
    pub fn parse(definition: &str) -> Result<Self, RuleParseError> {
        if definition.trim().is_empty() {
            return Ok(Self::new());
        }
        let rules = definition
            .split('|')
            .map(Rule::parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn string(self) -> Self {
        self.rule(Rule::TypeString)
    }

    pub fn int(self) -> Self {
        self.rule(Rule::TypeInt)
    }

    pub fn float(self) -> Self {
        self.rule(Rule::TypeFloat)
    }

    pub fn boolean(self) -> Self {
        self.rule(Rule::TypeBoolean)
    }

    pub fn email(self) -> Self {
        self.rule(Rule::Email)
    }

    pub fn min(self, bound: impl Into<f64>) -> Self {
        self.rule(Rule::Min(bound.into()))
    }

    pub fn max(self, bound: impl Into<f64>) -> Self {
        self.rule(Rule::Max(bound.into()))
    }

    pub fn pattern(self, kind: PatternKind) -> Self {
        self.rule(Rule::Pattern(kind))
    }

    pub fn date(self) -> Self {
        self.rule(Rule::DateOnly)
    }

    pub fn datetime(self) -> Self {
        self.rule(Rule::DateTime)
    }

    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(Rule::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// Whether `min`/`max` compare numbers rather than character counts
    pub fn is_numeric(&self) -> bool {
        self.rules.iter().any(Rule::is_numeric_type)
    }

    pub fn declares(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }
}

/// Rule sets for every accepted field of an input record, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    fields: Vec<(String, RuleSet)>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `(field, "rule|rule:param")` pairs.
    ///
    /// Declaring the same field twice is rejected.
    pub fn parse<I, K, V>(declarations: I) -> Result<Self, RuleParseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut rules = Self::new();
        for (field, definition) in declarations {
            let field = field.into();
            let set = RuleSet::parse(definition.as_ref()).map_err(|e| RuleParseError::Field {
                field: field.clone(),
                source: Box::new(e),
            })?;
            rules = rules.field(field, set)?;
        }
        Ok(rules)
    }

    /// Add a field.
    ///
    /// Declaring the same field twice is rejected, as with [`FieldRules::parse`].
    pub fn field(mut self, name: impl Into<String>, set: RuleSet) -> Result<Self, RuleParseError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RuleParseError::DuplicateField(name));
        }
        self.fields.push((name, set));
        Ok(self)
    }

    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, set)| set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `input` against these rules
    pub fn validate(&self, input: &Map<String, Value>) -> ValidationOutcome {
        validate(input, self)
    }
}
