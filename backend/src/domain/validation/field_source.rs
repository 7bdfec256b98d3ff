//! Read access to request fields for the validation chain.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Source of named field values.
///
/// `value` returns `None` for absent fields and JSON `null`; the chain treats
/// both as the empty string.
pub trait FieldSource {
    /// Rendered value of `field`, if any.
    fn value(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Whether `field` appears in the source at all, including as `null`.
    fn contains(&self, field: &str) -> bool;
}

impl FieldSource for Map<String, Value> {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field)? {
            Value::Null => None,
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn contains(&self, field: &str) -> bool {
        self.contains_key(field)
    }
}

impl FieldSource for [(&str, &str)] {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| Cow::Borrowed(*value))
    }

    fn contains(&self, field: &str) -> bool {
        self.iter().any(|(name, _)| *name == field)
    }
}
