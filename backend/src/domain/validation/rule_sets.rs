//! Rule-sets applied by the HTTP routes.

use std::sync::OnceLock;

use super::{RuleSet, ValidationRule, checks};

static SUBSCRIBER_RULES: OnceLock<RuleSet> = OnceLock::new();
static LOGIN_RULES: OnceLock<RuleSet> = OnceLock::new();

/// Rules for subscriber bodies: `name`, `email`, `subs_date`, `description`.
pub fn subscriber_rules() -> &'static RuleSet {
    SUBSCRIBER_RULES.get_or_init(|| {
        RuleSet::new("subscribers")
            .rule(
                ValidationRule::new("name")
                    .check(checks::not_empty, "Name is required")
                    .check(checks::min_length_one, "Name is required")
                    .check(checks::name_length, "Name must be at most 255 characters"),
            )
            .rule(
                ValidationRule::new("email")
                    .check(checks::not_empty, "Email is required")
                    .check(checks::email, "Email is not valid"),
            )
            .rule(
                ValidationRule::new("subs_date")
                    .check(checks::not_empty, "Subs Date is required")
                    .check(
                        checks::iso_date,
                        "Invalid date format. Use YYYY-MM-DD format",
                    ),
            )
            .rule(
                ValidationRule::new("description")
                    .check(checks::not_empty, "Description is required")
                    .check(checks::min_length_one, "Description is required"),
            )
    })
}

/// Presence rules for `POST /login`.
pub fn login_rules() -> &'static RuleSet {
    LOGIN_RULES.get_or_init(|| {
        RuleSet::new("login")
            .rule(ValidationRule::new("email").check(checks::not_empty, "Email is required"))
            .rule(ValidationRule::new("password").check(checks::not_empty, "Password is required"))
    })
}
