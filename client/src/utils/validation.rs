//! Validation of the login, sign-up and password reset forms.
//!
//! Errors are collected per field so a front end can show them inline.

use std::collections::BTreeMap;
use std::fmt;

use lib_utils::looks_like_email;

use crate::core::error::AppError;

/// Minimum password length accepted by the identity provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum display name length, after trimming.
pub const MIN_DISPLAY_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    DisplayName,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::DisplayName => "displayName",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Terms => "terms",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, String>,
}

impl FormErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn set(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    /// `Ok` when every field passed, otherwise the first message as a validation error.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.errors.into_values().next() {
            None => Ok(()),
            Some(message) => Err(AppError::Validation(message)),
        }
    }
}

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.set(FormField::Email, "Email is required");
    } else if !looks_like_email(email) {
        errors.set(FormField::Email, "Invalid email");
    }
}

fn check_password(errors: &mut FormErrors, password: &str) {
    if password.is_empty() {
        errors.set(FormField::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.set(FormField::Password, "Minimum 6 characters");
    }
}

pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors
}

/// Sign-up form contents.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

pub fn validate_signup(form: &SignupForm) -> FormErrors {
    let mut errors = FormErrors::default();

    let name = form.display_name.trim();
    if name.is_empty() {
        errors.set(FormField::DisplayName, "Name is required");
    } else if name.chars().count() < MIN_DISPLAY_NAME_LEN {
        errors.set(FormField::DisplayName, "Minimum 2 characters");
    }

    check_email(&mut errors, &form.email);
    check_password(&mut errors, &form.password);

    if form.confirm_password.is_empty() {
        errors.set(FormField::ConfirmPassword, "Confirmation is required");
    } else if form.confirm_password != form.password {
        errors.set(FormField::ConfirmPassword, "Passwords do not match");
    }

    if !form.accept_terms {
        errors.set(FormField::Terms, "Please accept the terms of use");
    }

    errors
}

pub fn validate_reset(email: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    check_email(&mut errors, email);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        assert!(validate_login("awa@example.ci", "secret").is_valid());

        let errors = validate_login("  ", "");
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert_eq!(errors.get(FormField::Password), Some("Password is required"));

        let errors = validate_login("awa@example", "12345");
        assert_eq!(errors.get(FormField::Email), Some("Invalid email"));
        assert_eq!(errors.get(FormField::Password), Some("Minimum 6 characters"));
    }

    #[test]
    fn test_signup_validation() {
        let mut form = SignupForm {
            display_name: " Awa ".into(),
            email: "awa@example.ci".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            accept_terms: true,
        };
        assert!(validate_signup(&form).is_valid());

        form.display_name = " A ".into();
        form.confirm_password = "secret2".into();
        form.accept_terms = false;
        let errors = validate_signup(&form);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::DisplayName), Some("Minimum 2 characters"));
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.get(FormField::Terms), Some("Please accept the terms of use"));

        form.confirm_password.clear();
        assert_eq!(
            validate_signup(&form).get(FormField::ConfirmPassword),
            Some("Confirmation is required")
        );
    }

    #[test]
    fn test_reset_validation_and_first_error() {
        assert!(validate_reset("awa@example.ci").into_result().is_ok());
        let err = validate_reset("not-an-email").into_result().unwrap_err();
        assert_eq!(err.user_message(), "Invalid email");
    }
}
