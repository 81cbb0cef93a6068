use std::fmt;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A predicate over the field text paired with the message shown when it fails.
pub(crate) struct ValidationRule {
    validate: Predicate,
    error_message: String,
}

impl ValidationRule {
    pub fn new<F, T>(validate: F, error_message: T) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
        T: Into<String>,
    {
        Self {
            validate: Box::new(validate),
            error_message: error_message.into(),
        }
    }

    /// Passes when the text has more than `len` characters.
    pub fn longer_than<T: Into<String>>(len: usize, error_message: T) -> Self {
        Self::new(move |value| value.chars().count() > len, error_message)
    }

    /// Passes when the text contains `pattern`.
    pub fn contains<P: Into<String>, T: Into<String>>(pattern: P, error_message: T) -> Self {
        let pattern = pattern.into();
        Self::new(move |value| value.contains(pattern.as_str()), error_message)
    }

    pub fn check(&self, value: &str) -> bool {
        (self.validate)(value)
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidationOutcome {
    Valid,
    /// Messages of every failed rule, in rule order, joined by a single space
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn into_error(self) -> Option<String> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(msg) => Some(msg),
        }
    }
}

/// Run every rule against `value`. All rules are evaluated, none short-circuits.
pub(crate) fn validate(rules: &[ValidationRule], value: &str) -> ValidationOutcome {
    let failed: Vec<&str> = rules
        .iter()
        .filter(|rule| !rule.check(value))
        .map(|rule| rule.error_message())
        .collect();

    if failed.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(failed.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use insta::assert_snapshot;

    use super::*;

    fn email_rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::longer_than(5, "too short"),
            ValidationRule::contains("@", "needs @"),
        ]
    }

    #[test]
    fn empty_rules_are_valid() {
        assert_eq!(validate(&[], ""), ValidationOutcome::Valid);
        assert_eq!(validate(&[], "anything"), ValidationOutcome::Valid);
    }

    #[test]
    fn failures_joined_in_rule_order() {
        let outcome = validate(&email_rules(), "ab");
        assert!(!outcome.is_valid());
        assert_snapshot!(outcome.into_error().unwrap(), @"too short needs @");

        let reversed: Vec<_> = email_rules().into_iter().rev().collect();
        assert_eq!(
            validate(&reversed, "ab").into_error().as_deref(),
            Some("needs @ too short")
        );
    }

    #[test]
    fn only_failing_rules_reported() {
        assert_eq!(
            validate(&email_rules(), "abcdefgh").into_error().as_deref(),
            Some("needs @")
        );
        assert_eq!(
            validate(&email_rules(), "a@b").into_error().as_deref(),
            Some("too short")
        );
        assert_eq!(validate(&email_rules(), "abcdef@x"), ValidationOutcome::Valid);
    }

    #[test]
    fn every_rule_is_evaluated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rules: Vec<_> = (0..3)
            .map(|i| {
                let calls = calls.clone();
                ValidationRule::new(
                    move |_| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        false
                    },
                    format!("rule{i}"),
                )
            })
            .collect();

        assert_eq!(
            validate(&rules, "x").into_error().as_deref(),
            Some("rule0 rule1 rule2")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn longer_than_counts_chars() {
        let rule = ValidationRule::longer_than(2, "short");
        assert!(!rule.check("ab"));
        assert!(rule.check("abc"));
        // multi-byte characters count once each
        assert!(!rule.check("éé"));
        assert_eq!(rule.error_message(), "short");
    }
}
