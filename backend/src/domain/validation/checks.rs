//! Reusable predicates for [`super::ValidationRule`].

use std::sync::OnceLock;

use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static ISO_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("validation regex failed to compile: {error}"))
    })
}

/// Value is not the empty string. Whitespace counts as content.
pub fn not_empty(value: &str) -> bool {
    !value.is_empty()
}

/// Value holds at least one character.
pub fn min_length_one(value: &str) -> bool {
    value.chars().count() >= 1
}

/// Longest subscriber name the `subscribers.name` column stores.
pub const NAME_MAX_CHARS: usize = 255;

/// Value fits the subscriber name column.
pub fn name_length(value: &str) -> bool {
    value.chars().count() <= NAME_MAX_CHARS
}

/// Value looks like `local@domain.tld`.
///
/// The local part allows the RFC 5322 atom characters and dots; the domain
/// needs at least two labels.
pub fn email(value: &str) -> bool {
    let re = compiled(
        &EMAIL_RE,
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    );
    value.len() <= 254 && re.is_match(value)
}

/// Value matches `YYYY-MM-DD` using ASCII digits.
pub fn iso_date(value: &str) -> bool {
    compiled(&ISO_DATE_RE, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").is_match(value)
}
