use regex::Regex;

use crate::types::InputType;

/// A `pattern` constraint. Like the HTML attribute, it must match the whole
/// value, so the source is compiled as `^(?:source)$`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Built-in constraints configured on a control.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub required: bool,
    /// Minimum length in characters. Empty values are never too short.
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub input_type: InputType,
}

impl Constraints {
    /// Evaluate the constraints against a value.
    pub fn evaluate(&self, value: &str) -> Validity {
        let len = value.chars().count();
        let empty = value.is_empty();

        Validity {
            value_missing: self.required && empty,
            type_mismatch: !empty
                && self.input_type == InputType::Email
                && !email_address::EmailAddress::is_valid(value),
            pattern_mismatch: !empty
                && self.pattern.as_ref().is_some_and(|p| !p.is_match(value)),
            too_long: self.max_length.is_some_and(|max| len > max),
            too_short: !empty && self.min_length.is_some_and(|min| len < min),
        }
    }
}

/// Result of built-in constraint validation, mirroring the browser's
/// `ValidityState` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validity {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
}

impl Validity {
    pub fn valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_long
            || self.too_short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_anchored() {
        let pattern = Pattern::new("[a-z]{3,12}").unwrap();
        assert!(pattern.is_match("alice"));
        assert!(!pattern.is_match("Alice"));
        assert!(!pattern.is_match("alice!"));
        assert_eq!(pattern.source(), "[a-z]{3,12}");
    }

    #[test]
    fn test_required_empty_value() {
        let constraints = Constraints {
            required: true,
            min_length: Some(8),
            ..Default::default()
        };
        let validity = constraints.evaluate("");
        assert!(validity.value_missing);
        assert!(!validity.too_short, "minlength does not apply to empty values");
        assert!(!validity.valid());
    }

    #[test]
    fn test_required_whitespace_value() {
        let constraints = Constraints {
            required: true,
            ..Default::default()
        };
        assert!(constraints.evaluate("   ").valid());
    }

    #[test]
    fn test_optional_empty_value_is_valid() {
        let constraints = Constraints {
            pattern: Some(Pattern::new("[a-z]+").unwrap()),
            input_type: InputType::Email,
            ..Default::default()
        };
        assert!(constraints.evaluate("").valid());
    }

    #[test]
    fn test_lengths_count_characters() {
        let constraints = Constraints {
            min_length: Some(2),
            max_length: Some(3),
            ..Default::default()
        };
        assert!(constraints.evaluate("Łó").valid());
        assert!(constraints.evaluate("a").too_short);
        assert!(constraints.evaluate("żółw").too_long);
    }

    #[test]
    fn test_email_type() {
        let constraints = Constraints {
            input_type: InputType::Email,
            ..Default::default()
        };
        assert!(constraints.evaluate("alice@example.com").valid());
        assert!(constraints.evaluate("not-an-email").type_mismatch);
    }

    #[test]
    fn test_polish_name_pattern() {
        let constraints = Constraints {
            required: true,
            pattern: Some(Pattern::new("[A-ZĄĆĘŁŃÓŚŹŻ][a-ząćęłńóśźż]+").unwrap()),
            ..Default::default()
        };
        assert!(constraints.evaluate("Łukasz").valid());
        assert!(constraints.evaluate("ŁUkasz").pattern_mismatch);
        assert!(constraints.evaluate("J").pattern_mismatch);
    }
}
