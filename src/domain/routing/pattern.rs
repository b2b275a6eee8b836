//! Route pattern parsing and matching
//!
//! Patterns are path templates made of literal segments and `{name}`
//! placeholders. A placeholder matches exactly one non-empty segment.
//! Request segments are percent-decoded one by one before they are compared
//! or bound, so an encoded `/` never splits a segment.

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing a route pattern
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutePatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,

    #[error("unbalanced placeholder in segment `{0}`")]
    UnbalancedPlaceholder(String),

    #[error("invalid placeholder name `{0}`")]
    InvalidParameterName(String),

    #[error("duplicate placeholder name `{0}`")]
    DuplicateParameter(String),
}

/// A single path segment in a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    Placeholder(String),
}

/// Ordered path parameters bound while matching, left to right
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    original: String,
    segments: Vec<PathSegment>,
}

impl RoutePattern {
    /// Parse a route pattern from a path string
    pub fn parse(pattern: &str) -> Result<Self, RoutePatternError> {
        if !pattern.starts_with('/') {
            return Err(RoutePatternError::MissingLeadingSlash);
        }

        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for raw in split_segments(pattern) {
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    if name.contains('{') || name.contains('}') {
                        return Err(RoutePatternError::UnbalancedPlaceholder(raw.to_string()));
                    }
                    if !is_valid_name(name) {
                        return Err(RoutePatternError::InvalidParameterName(name.to_string()));
                    }
                    if !seen.insert(name.to_string()) {
                        return Err(RoutePatternError::DuplicateParameter(name.to_string()));
                    }
                    PathSegment::Placeholder(name.to_string())
                }
                None if raw.contains('{') || raw.contains('}') => {
                    return Err(RoutePatternError::UnbalancedPlaceholder(raw.to_string()));
                }
                None => PathSegment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            original: pattern.to_string(),
            segments,
        })
    }

    /// Match a request path, binding placeholders in order
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            // Segments that do not decode to UTF-8 match nothing
            let part = urlencoding::decode(part).ok()?;
            match segment {
                PathSegment::Literal(literal) if *literal == part => {}
                PathSegment::Literal(_) => return None,
                PathSegment::Placeholder(name) => params.push(name.clone(), part),
            }
        }
        Some(params)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Non-empty segments; trailing and doubled slashes are ignored
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
