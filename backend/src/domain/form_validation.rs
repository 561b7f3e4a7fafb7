//! Inline validation for local forms (user creation, password change,
//! password reset).
//!
//! Failures here are shown next to the form and never reach the
//! notification service.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::{FormFieldError, FormValidationResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Clone, Default)]
pub struct FormValidationService;

impl FormValidationService {
    pub fn new() -> Self {
        Self
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        EMAIL_PATTERN.is_match(email.trim())
    }

    /// Name, e-mail and initial password of a new user
    pub fn validate_new_user(&self, name: &str, email: &str, password: &str) -> FormValidationResult {
        let mut errors = Vec::new();

        require(&mut errors, "name", name);
        if require(&mut errors, "email", email) && !self.is_valid_email(email) {
            errors.push(FormFieldError::InvalidEmail(email.trim().to_string()));
        }
        if require(&mut errors, "password", password) {
            check_length(&mut errors, password);
        }

        result(errors)
    }

    /// Current password, new password and its confirmation
    pub fn validate_password_change(&self, current: &str, new: &str, confirmation: &str) -> FormValidationResult {
        let mut errors = Vec::new();

        let all_present = [("currentPassword", current), ("newPassword", new), ("confirmPassword", confirmation)]
            .into_iter()
            .fold(true, |ok, (field, value)| require(&mut errors, field, value) && ok);
        if !all_present {
            return result(errors);
        }

        check_length(&mut errors, new);
        if new != confirmation {
            errors.push(FormFieldError::PasswordMismatch);
        }
        if current == new {
            errors.push(FormFieldError::PasswordUnchanged);
        }

        result(errors)
    }

    /// New password and confirmation on the reset screen
    pub fn validate_password_reset(&self, new: &str, confirmation: &str) -> FormValidationResult {
        let mut errors = Vec::new();

        check_length(&mut errors, new);
        if new != confirmation {
            errors.push(FormFieldError::PasswordMismatch);
        }

        result(errors)
    }

    pub fn error_message(&self, error: &FormFieldError) -> String {
        match error {
            FormFieldError::RequiredFieldMissing(field) => format!("Preencha o campo {}.", field_label(field)),
            FormFieldError::InvalidEmail(email) => format!("{} não é um e-mail válido.", email),
            FormFieldError::PasswordTooShort(min) => {
                format!("A senha deve ter no mínimo {} caracteres.", min)
            }
            FormFieldError::PasswordMismatch => "As senhas não coincidem.".to_string(),
            FormFieldError::PasswordUnchanged => "A nova senha deve ser diferente da senha atual.".to_string(),
        }
    }

    pub fn error_messages(&self, errors: &[FormFieldError]) -> Vec<String> {
        errors.iter().map(|e| self.error_message(e)).collect()
    }
}

/// Display name of a form field as the screens label it
fn field_label(field: &str) -> &str {
    match field {
        "name" => "nome",
        "email" => "e-mail",
        "password" => "senha",
        "currentPassword" => "senha atual",
        "newPassword" => "nova senha",
        "confirmPassword" => "confirmação de senha",
        other => other,
    }
}

/// Push a missing-field error for blank values; true when present
fn require(errors: &mut Vec<FormFieldError>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FormFieldError::RequiredFieldMissing(field.to_string()));
        false
    } else {
        true
    }
}

fn check_length(errors: &mut Vec<FormFieldError>, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FormFieldError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
}

fn result(errors: Vec<FormFieldError>) -> FormValidationResult {
    FormValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
