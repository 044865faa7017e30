//! Login and registration forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::contract::{LoginRequest, RegisterRequest};
use crate::error::{ValidationError, ValidationErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = Vec::new();
        let email = self.email.trim();

        if email.is_empty() {
            errors.push(ValidationError::MissingField("email"));
        }
        if self.password.trim().is_empty() {
            errors.push(ValidationError::MissingField("password"));
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub national_id: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = Vec::new();

        for (value, field) in [
            (&self.first_names, "first names"),
            (&self.last_names, "last names"),
            (&self.national_id, "national id"),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::MissingField(field));
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::MissingField("email"));
        } else if !is_valid_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }

        if self.password.trim().is_empty() {
            errors.push(ValidationError::MissingField("password"));
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        } else if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(RegisterRequest {
            first_names: self.first_names.trim().to_string(),
            last_names: self.last_names.trim().to_string(),
            email: email.to_string(),
            national_id: self.national_id.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_names: "Ana Maria".into(),
            last_names: "Lopez".into(),
            email: "ana@uni.edu.co".into(),
            national_id: "12345678".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn test_valid_registration() {
        let request = form().validate().unwrap();
        assert_eq!(request.email, "ana@uni.edu.co");
        assert_eq!(request.first_names, "Ana Maria");
    }

    #[test]
    fn test_short_password() {
        let mut f = form();
        f.password = "abc".into();
        f.confirm_password = "abc".into();
        let errors = f.validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::PasswordTooShort(6)]);
    }

    #[test]
    fn test_password_mismatch() {
        let mut f = form();
        f.confirm_password = "secret2".into();
        let errors = f.validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::PasswordMismatch]);
    }

    #[test]
    fn test_invalid_email_and_missing_id() {
        let mut f = form();
        f.email = "not-an-email".into();
        f.national_id = " ".into();
        let errors = f.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidEmail));
        assert!(errors.contains(&ValidationError::MissingField("national id")));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        let request = LoginForm {
            email: " ana@uni.edu ".into(),
            password: "pw".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(request.email, "ana@uni.edu");
    }
}
