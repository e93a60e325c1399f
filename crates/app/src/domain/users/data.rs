//! Users Data

use crate::domain::{users::records::UserUuid, validation::ValidationErrors};

pub const USERNAME_MAX_CHARS: usize = 150;
pub const EMAIL_MAX_CHARS: usize = 254;

/// Sign-up form as submitted. Missing fields are reported by [`Registration::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
    pub receive_emails_order_updates: Option<bool>,
    pub receive_emails_new_items: Option<bool>,
}

/// A user ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub receive_emails_order_updates: bool,
    pub receive_emails_new_items: bool,
}

impl Registration {
    /// Check the form shape. Uniqueness is checked against storage by the service.
    pub fn validate(self) -> Result<NewUser, ValidationErrors> {
        if self.password != self.confirmation {
            return Err(ValidationErrors::single("password", "Passwords don't match"));
        }

        let mut errors = ValidationErrors::new();

        let username = required(&mut errors, "username", "Username not provided", self.username);
        let email = required(&mut errors, "email", "Email not provided", self.email);
        let password = required(&mut errors, "password", "Password not provided", self.password);

        if let Some(username) = &username {
            check_username(&mut errors, username);
        }

        if let Some(email) = &email {
            check_email(&mut errors, email);
        }

        errors.into_result()?;

        Ok(NewUser {
            uuid: UserUuid::new(),
            username: username.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
            is_staff: false,
            receive_emails_order_updates: self.receive_emails_order_updates.unwrap_or(true),
            receive_emails_new_items: self.receive_emails_new_items.unwrap_or(false),
        })
    }
}

/// Email preference changes; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub receive_emails_new_items: Option<bool>,
    pub receive_emails_order_updates: Option<bool>,
}

impl PreferencesUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receive_emails_new_items.is_none() && self.receive_emails_order_updates.is_none()
    }
}

fn required(
    errors: &mut ValidationErrors,
    field: &str,
    message: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

fn check_username(errors: &mut ValidationErrors, username: &str) {
    let valid_chars = username
        .chars()
        .all(|ch| ch.is_alphanumeric() || matches!(ch, '@' | '.' | '+' | '-' | '_'));

    if username.chars().count() > USERNAME_MAX_CHARS {
        errors.add(
            "username",
            format!("Ensure this field has no more than {USERNAME_MAX_CHARS} characters."),
        );
    } else if !valid_chars {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    let valid = email.chars().count() <= EMAIL_MAX_CHARS
        && !email.contains(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split('.')
                    .filter(|label| !label.is_empty())
                    .count()
                    >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if !valid {
        errors.add("email", "Enter a valid email address.");
    }
}
