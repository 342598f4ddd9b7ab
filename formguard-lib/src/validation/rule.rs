use std::sync::Arc;

use crate::check::AsyncCheck;

/// How to validate one field.
///
/// # Example
///
/// ```ignore
/// let rule = Rule::new("passwordConfirmation", "At least 8 characters.")
///     .check(PasswordMatch::new("password", "Passwords must match."));
/// ```
#[derive(Clone)]
pub struct Rule {
    field_id: String,
    message: String,
    check: Option<Arc<dyn AsyncCheck>>,
    dependents: Vec<String>,
}

impl Rule {
    /// A rule whose control shows `message` when it fails its built-in
    /// constraints.
    pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: message.into(),
            check: None,
            dependents: Vec::new(),
        }
    }

    /// Run `check` once the built-in constraints pass.
    pub fn check(mut self, check: impl AsyncCheck + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    /// Re-validate `field_id` after every live input on this field, if that
    /// field is non-empty.
    pub fn dependent(mut self, field_id: impl Into<String>) -> Self {
        self.dependents.push(field_id.into());
        self
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn async_check(&self) -> Option<&dyn AsyncCheck> {
        self.check.as_deref()
    }

    pub fn dependents(&self) -> &[String] {
        &self.dependents
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("field_id", &self.field_id)
            .field("message", &self.message)
            .field("check", &self.check.is_some())
            .field("dependents", &self.dependents)
            .finish()
    }
}

/// An immutable list of rules. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
}

impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The first rule for `field_id`.
    pub fn get(&self, field_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.field_id == field_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::PasswordMatch;

    #[test]
    fn test_lookup() {
        let rules = RuleSet::new([
            Rule::new("login", "bad login"),
            Rule::new("password", "short").dependent("passwordConfirmation"),
            Rule::new("passwordConfirmation", "short")
                .check(PasswordMatch::new("password", "mismatch")),
        ]);

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.get("login").unwrap().message(), "bad login");
        assert!(rules.get("login").unwrap().async_check().is_none());
        assert!(rules.get("passwordConfirmation").unwrap().async_check().is_some());
        assert_eq!(rules.get("password").unwrap().dependents(), ["passwordConfirmation"]);
        assert!(rules.get("missing").is_none());
    }

    #[test]
    fn test_clones_share_rules() {
        let rules: RuleSet = vec![Rule::new("a", "x")].into_iter().collect();
        let clone = rules.clone();
        assert!(std::ptr::eq(rules.get("a").unwrap(), clone.get("a").unwrap()));
    }
}
