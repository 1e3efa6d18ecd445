//! Declarative field validation: a table of `field -> predicate -> message`.
//!
//! Rules for a field run in table order and the first failure wins. A
//! failing field never stops the remaining fields from being checked, so a
//! form can show every inline error at once.

use std::sync::LazyLock;

use regex::Regex;

/// Form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    Image,
    Role,
}

impl Field {
    /// Input `name`/`id` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Image => "image",
            Field::Role => "role",
        }
    }
}

pub const REQUIRED: &str = "Required field";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const PASSWORD_TOO_SHORT: &str = "Minimum password length is 6 characters";
pub const NAME_TOO_LONG: &str = "Maximum length is 50 characters";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const INVALID_URL: &str = "Invalid URL";
pub const INVALID_ROLE: &str = "Invalid role";

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 50;

/// One row of a validation table for form type `T`.
pub struct Rule<T> {
    pub field: Field,
    pub message: &'static str,
    check: fn(&T) -> bool,
}

impl<T> Rule<T> {
    pub const fn new(field: Field, message: &'static str, check: fn(&T) -> bool) -> Self {
        Self {
            field,
            message,
            check,
        }
    }

    pub fn passes(&self, form: &T) -> bool {
        (self.check)(form)
    }
}

/// Inline errors keyed by field, in the order the fields were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().copied()
    }

    fn record(&mut self, field: Field, message: &'static str) {
        if !self.contains(field) {
            self.0.push((field, message));
        }
    }
}

/// Run every rule in `rules` against `form`.
pub fn validate<T>(form: &T, rules: &[Rule<T>]) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for rule in rules {
        if errors.contains(rule.field) {
            continue;
        }
        if !rule.passes(form) {
            errors.record(rule.field, rule.message);
        }
    }
    errors
}

// ─────────────────────────────────────────────────────────────────────────────
// Predicates
// ─────────────────────────────────────────────────────────────────────────────

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("invalid email pattern")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("invalid url pattern")
});

pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// Well-formed email. Empty input passes; pair with [`is_present`].
pub fn is_email(value: &str) -> bool {
    value.is_empty() || EMAIL.is_match(value)
}

/// Absolute http(s)/ftp URL. Empty input passes.
pub fn is_url(value: &str) -> bool {
    value.is_empty() || URL.is_match(value)
}

pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        a: &'static str,
        b: &'static str,
    }

    const PROBE_RULES: &[Rule<Probe>] = &[
        Rule::new(Field::Email, "first", |p: &Probe| !p.a.is_empty()),
        Rule::new(Field::Email, "second", |p: &Probe| p.a.len() > 3),
        Rule::new(Field::Password, "third", |p: &Probe| p.b.len() > 3),
    ];

    #[test]
    fn first_failing_rule_per_field_wins() {
        let errors = validate(&Probe { a: "", b: "" }, PROBE_RULES);
        assert_eq!(errors.get(Field::Email), Some("first"));
        assert_eq!(errors.get(Field::Password), Some("third"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn passing_form_has_no_errors() {
        let errors = validate(&Probe { a: "abcd", b: "efgh" }, PROBE_RULES);
        assert!(errors.is_empty());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("someone@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(is_email(""));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a@b@c"));
        assert!(!is_email("with space@example.com"));
    }

    #[test]
    fn url_shapes() {
        assert!(is_url("https://cdn.example.com/avatar.png"));
        assert!(is_url("HTTP://example.com"));
        assert!(is_url(""));
        assert!(!is_url("example.com/avatar.png"));
        assert!(!is_url("https://exa mple.com"));
    }

    #[test]
    fn lengths_count_characters() {
        assert!(min_chars("абвгде", 6));
        assert!(!min_chars("abc12", 6));
        assert!(max_chars(&"я".repeat(50), 50));
        assert!(!max_chars(&"x".repeat(51), 50));
    }
}
