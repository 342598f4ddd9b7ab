//! The sign-up form: markup and rules.

use formdom::{Element, InputType};

use crate::check::{AvailabilityCheck, AvailabilityClient, PasswordMatch};
use crate::validation::{Rule, RuleSet};

/// Default form ID.
pub const FORM_ID: &str = "signUpForm";

pub const FIRSTNAME: &str = "firstname";
pub const LASTNAME: &str = "lastname";
pub const LOGIN: &str = "login";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRMATION: &str = "passwordConfirmation";
pub const ADDRESS: &str = "address";
pub const SEX: &str = "sex";

/// Capitalised name in the Polish alphabet.
pub const NAME_PATTERN: &str = "[A-ZĄĆĘŁŃÓŚŹŻ][a-ząćęłńóśźż]+";
pub const LOGIN_PATTERN: &str = "[a-z]{3,12}";
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const ADDRESS_MAX_LENGTH: usize = 200;

pub mod messages {
    pub const FIRSTNAME: &str = "First name must have at least 2 letters of the Polish alphabet, \
                                 and only the first may be uppercase.";
    pub const LASTNAME: &str = "Last name must have at least 2 letters of the Polish alphabet, \
                                and only the first may be uppercase.";
    pub const LOGIN: &str = "Username must consist of 3 to 12 lowercase letters.";
    pub const EMAIL: &str = "Invalid e-mail address.";
    pub const PASSWORD: &str = "Password must have at least 8 characters.";
    pub const PASSWORD_MISMATCH: &str = "Passwords must match.";
    pub const ADDRESS: &str = "Address is required.";
    pub const REQUIRED: &str = "This field is required.";
}

/// The sign-up form markup with its built-in constraints.
pub fn form(form_id: &str) -> Element {
    Element::form(form_id).children([
        Element::input(FIRSTNAME).required(true).pattern(NAME_PATTERN),
        Element::input(LASTNAME).required(true).pattern(NAME_PATTERN),
        Element::input(LOGIN).required(true).pattern(LOGIN_PATTERN),
        Element::input(EMAIL).required(true).input_type(InputType::Email),
        Element::input(PASSWORD)
            .required(true)
            .input_type(InputType::Password)
            .min_length(PASSWORD_MIN_LENGTH),
        Element::input(PASSWORD_CONFIRMATION)
            .required(true)
            .input_type(InputType::Password)
            .min_length(PASSWORD_MIN_LENGTH),
        Element::input(ADDRESS).required(true).max_length(ADDRESS_MAX_LENGTH),
        Element::select(SEX, ["female", "male"]).required(true),
    ])
}

/// Rules for the sign-up form. The login is checked for availability with
/// `client`.
pub fn rules(client: AvailabilityClient) -> RuleSet {
    RuleSet::new([
        Rule::new(FIRSTNAME, messages::FIRSTNAME),
        Rule::new(LASTNAME, messages::LASTNAME),
        Rule::new(LOGIN, messages::LOGIN).check(AvailabilityCheck::new(client)),
        Rule::new(EMAIL, messages::EMAIL),
        Rule::new(PASSWORD, messages::PASSWORD).dependent(PASSWORD_CONFIRMATION),
        Rule::new(PASSWORD_CONFIRMATION, messages::PASSWORD)
            .check(PasswordMatch::new(PASSWORD, messages::PASSWORD_MISMATCH)),
        Rule::new(ADDRESS, messages::ADDRESS),
        Rule::new(SEX, messages::REQUIRED),
    ])
}

#[cfg(test)]
mod tests {
    use formdom::Document;

    use super::*;
    use crate::config::CheckConfig;

    #[test]
    fn test_every_rule_has_a_control() {
        let client = AvailabilityClient::new(&CheckConfig::default()).unwrap();
        let rules = rules(client);
        let doc = Document::new(form(FORM_ID));

        for rule in &rules {
            assert!(doc.control(rule.field_id()).is_some(), "{}", rule.field_id());
        }
        assert_eq!(rules.len(), 8);
    }

    #[test]
    fn test_markup_constraints() {
        let doc = Document::new(form(FORM_ID));
        assert_eq!(doc.invalid_controls(FORM_ID).len(), 8, "everything is required");

        doc.set_value(FIRSTNAME, "Łucja");
        doc.set_value(LASTNAME, "Żak");
        doc.set_value(LOGIN, "lucja");
        doc.set_value(EMAIL, "lucja@example.com");
        doc.set_value(PASSWORD, "correct horse");
        doc.set_value(PASSWORD_CONFIRMATION, "correct horse");
        doc.set_value(ADDRESS, "ul. Długa 1, Gdańsk");
        doc.set_value(SEX, "female");
        assert!(doc.invalid_controls(FORM_ID).is_empty());

        doc.set_value(LOGIN, "lu");
        assert_eq!(doc.invalid_controls(FORM_ID), vec![LOGIN]);
    }
}
