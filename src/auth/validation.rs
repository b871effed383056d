use regex::Regex;
use std::sync::LazyLock;

use crate::auth::types::{LoginPayload, RegisterPayload};
use crate::core::messages::{catalog, MessageCatalog};
use crate::tasks::validation::FieldErrors;

pub const PASSWORD_MIN: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("Invalid email regex")
});

/// A registration that passed validation, minus the hashed password (the
/// handler hashes after validation succeeds).
#[derive(Debug, Clone)]
pub struct RegisterDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_register(payload: &RegisterPayload) -> Result<RegisterDraft, FieldErrors> {
    let messages = catalog();
    let mut errors = FieldErrors::new();

    let name = match payload.name.as_deref().map(str::trim) {
        None | Some("") => {
            push_error(
                &mut errors,
                "name",
                MessageCatalog::for_field(&messages.field_required, "nombre"),
            );
            None
        }
        Some(name) => Some(name.to_string()),
    };

    let email = validate_email(payload.email.as_deref(), &mut errors);

    let password = match payload.password.as_deref() {
        None | Some("") => {
            push_error(
                &mut errors,
                "password",
                MessageCatalog::for_field(&messages.field_required, "contraseña"),
            );
            None
        }
        Some(password) if password.chars().count() < PASSWORD_MIN => {
            push_error(
                &mut errors,
                "password",
                MessageCatalog::for_min(&messages.password_too_short, PASSWORD_MIN),
            );
            None
        }
        Some(password) => Some(password.to_string()),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RegisterDraft {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
    })
}

pub fn validate_login(payload: &LoginPayload) -> Result<(String, String), FieldErrors> {
    let messages = catalog();
    let mut errors = FieldErrors::new();

    let email = validate_email(payload.email.as_deref(), &mut errors);

    let password = match payload.password.as_deref() {
        None | Some("") => {
            push_error(
                &mut errors,
                "password",
                MessageCatalog::for_field(&messages.field_required, "contraseña"),
            );
            None
        }
        Some(password) => Some(password.to_string()),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok((email.unwrap_or_default(), password.unwrap_or_default()))
}

fn validate_email(value: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
    let messages = catalog();
    match value.map(str::trim) {
        None | Some("") => {
            push_error(
                errors,
                "email",
                MessageCatalog::for_field(&messages.field_required, "correo"),
            );
            None
        }
        Some(email) if !EMAIL_REGEX.is_match(email) => {
            push_error(errors, "email", messages.invalid_email.clone());
            None
        }
        Some(email) => Some(email.to_lowercase()),
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
