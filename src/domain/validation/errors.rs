use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Human-readable violations per field.
///
/// A field may collect several messages in one validation pass; messages keep
/// the order of the rules that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_accumulate_in_order() {
        let mut errors = FieldErrors::new();
        errors.push("nombre", "primero");
        errors.push("nombre", "segundo");
        errors.push("edad", "tercero");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("nombre").unwrap(), &["primero".to_string(), "segundo".to_string()]);
        assert!(errors.contains("edad"));
        assert!(!errors.contains("email"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.push("nombre", "El campo nombre es obligatorio.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"nombre": ["El campo nombre es obligatorio."]}));
    }
}
