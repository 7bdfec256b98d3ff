//! Field-level validation chain for request bodies.
//!
//! A [`RuleSet`] is an ordered list of [`ValidationRule`]s, one per field. Each
//! rule holds an ordered list of checks. Evaluation runs every rule, stops at
//! the first failing check within a field, and collects failures across all
//! fields so callers see every problem in one response.
//!
//! ```
//! use serde_json::json;
//! use subscriber_api::domain::validation::{checks, RuleSet, ValidationRule};
//!
//! let rules = RuleSet::new("greeting")
//!     .rule(ValidationRule::new("name").check(checks::not_empty, "Name is required"));
//! let body = json!({ "name": "" });
//! let result = rules.validate(body.as_object().unwrap());
//! assert_eq!(result.failures()[0].message(), "Name is required");
//! ```

pub mod checks;
mod field_source;
mod rule_sets;

use serde::Serialize;

pub use field_source::FieldSource;
pub use rule_sets::{login_rules, subscriber_rules};

/// Predicate applied to a field's rendered value.
pub type Check = fn(&str) -> bool;

/// One failing check: the field it belongs to and the message to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    field: String,
    message: String,
}

impl ValidationFailure {
    /// Build a failure for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name as it appears in the request body.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Message associated with the failing check.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Ordered checks for a single named field.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    field: &'static str,
    checks: Vec<(Check, &'static str)>,
}

impl ValidationRule {
    /// Start a rule for `field` with no checks.
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    /// Append a check; checks run in the order they were added.
    #[must_use]
    pub fn check(mut self, predicate: Check, message: &'static str) -> Self {
        self.checks.push((predicate, message));
        self
    }

    /// Field this rule applies to.
    pub fn field(&self) -> &'static str {
        self.field
    }

    fn first_failure(&self, value: &str) -> Option<ValidationFailure> {
        self.checks
            .iter()
            .find(|(predicate, _)| !predicate(value))
            .map(|(_, message)| ValidationFailure::new(self.field, *message))
    }
}

/// Named, ordered collection of field rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<ValidationRule>,
}

impl RuleSet {
    /// Start an empty rule-set called `name`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a field rule.
    #[must_use]
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields covered by this rule-set, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(ValidationRule::field)
    }

    /// Run every rule against `source`. Missing fields are validated as empty.
    pub fn validate<S>(&self, source: &S) -> ValidationResult
    where
        S: FieldSource + ?Sized,
    {
        self.collect(source, |_| true)
    }

    /// Run only the rules whose field is present in `source`.
    ///
    /// Used for partial updates where absent fields keep their stored value.
    pub fn validate_present<S>(&self, source: &S) -> ValidationResult
    where
        S: FieldSource + ?Sized,
    {
        self.collect(source, |field| source.contains(field))
    }

    fn collect<S, F>(&self, source: &S, applies: F) -> ValidationResult
    where
        S: FieldSource + ?Sized,
        F: Fn(&str) -> bool,
    {
        let failures = self
            .rules
            .iter()
            .filter(|rule| applies(rule.field()))
            .filter_map(|rule| {
                let value = source.value(rule.field()).unwrap_or_default();
                rule.first_failure(&value)
            })
            .collect::<Vec<_>>();
        if !failures.is_empty() {
            tracing::debug!(
                rule_set = self.name,
                failures = failures.len(),
                "request validation failed"
            );
        }
        ValidationResult { failures }
    }
}

/// Failures gathered by one pass of a [`RuleSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    /// True when no check failed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in rule declaration order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Convert into a proceed/reject decision.
    pub fn into_outcome(self) -> Result<(), ValidationRejection> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationRejection(self.failures))
        }
    }
}

/// Non-empty set of failures that rejects a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request validation failed with {} failure(s)", .0.len())]
pub struct ValidationRejection(Vec<ValidationFailure>);

impl ValidationRejection {
    /// Reject with a single failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![ValidationFailure::new(field, message)])
    }

    /// Failures in rule declaration order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.0
    }

    /// Consume the rejection and return its failures.
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.0
    }
}
