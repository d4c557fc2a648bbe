//! Account field rules applied at registration and password change.

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum username length, in characters.
pub const MAX_USERNAME_LEN: usize = 150;

/// A registration or password-change field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidField {
    #[error("username must be 1-150 characters of letters, digits and @.+-_")]
    Username,
    #[error("email address is not valid")]
    Email,
    #[error("password must be at least 8 characters")]
    Password,
}

/// Letters, digits and `@.+-_`, 1-150 chars.
pub fn validate_username(username: &str) -> Result<(), InvalidField> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(InvalidField::Username);
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(InvalidField::Username);
    }
    Ok(())
}

/// Structural check only: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), InvalidField> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(InvalidField::Email);
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(InvalidField::Email);
    }
    let mut labels = domain.split('.');
    let dotted = domain.contains('.') && labels.all(|label| !label.is_empty());
    if !dotted {
        return Err(InvalidField::Email);
    }
    Ok(())
}

/// Trim and lowercase the domain part. The local part is kept as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_owned(),
    }
}

pub fn validate_password(password: &str) -> Result<(), InvalidField> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(InvalidField::Password);
    }
    Ok(())
}
