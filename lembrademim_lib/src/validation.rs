use chrono::{NaiveDate, Utc};
use lembrademim_api::types::Id;

use crate::error::LibError;

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_NOTES_LENGTH: usize = 5000;
pub const MAX_TAG_LENGTH: usize = 40;
pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const RESET_CODE_LENGTH: usize = 6;
pub const MAX_ID_LENGTH: usize = 64;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, LibError> {
    if input.len() > max_len {
        return Err(LibError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(LibError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Like [`sanitize_text`] but keeps newlines and tabs, and allows empty text.
pub fn validate_notes(input: &str) -> Result<String, LibError> {
    if input.len() > MAX_NOTES_LENGTH {
        return Err(LibError::InvalidInput(format!(
            "notes exceed maximum length of {} bytes",
            MAX_NOTES_LENGTH
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || matches!(c, ' ' | '\n' | '\t'))
        .collect::<String>()
        .trim()
        .to_string())
}

pub fn validate_name(input: &str) -> Result<String, LibError> {
    sanitize_text(input, MAX_NAME_LENGTH)
}

pub fn validate_search(input: &str) -> Result<String, LibError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Lowercases and checks the basic `local@domain.tld` shape.
pub fn validate_email(input: &str) -> Result<String, LibError> {
    let email = sanitize_text(input, MAX_EMAIL_LENGTH)?.to_lowercase();
    let invalid = || LibError::InvalidInput(format!("invalid email address '{}'", input.trim()));
    if email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(email)
}

pub fn validate_password(input: &str) -> Result<(), LibError> {
    if input.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(LibError::InvalidInput(format!(
            "password must have at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Reset codes are six digits.
pub fn validate_reset_code(input: &str) -> Result<String, LibError> {
    let code = input.trim();
    if code.len() != RESET_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(LibError::InvalidInput(format!(
            "reset code must be {} digits",
            RESET_CODE_LENGTH
        )));
    }
    Ok(code.to_string())
}

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`, rejects future dates, and returns
/// the ISO form the backend stores.
pub fn validate_birth_date(input: &str) -> Result<String, LibError> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| {
            LibError::InvalidInput(format!(
                "invalid birth date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
                input
            ))
        })?;
    if date > Utc::now().date_naive() {
        return Err(LibError::InvalidInput(format!(
            "birth date {} is in the future",
            date
        )));
    }
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Phone numbers: digits plus `+ - ( )` and spaces, 8 to 20 digits.
pub fn validate_phone(input: &str) -> Result<String, LibError> {
    let trimmed = input.trim();
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        return Err(LibError::InvalidInput(format!(
            "phone number '{}' contains invalid characters",
            input
        )));
    }
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    if !(8..=20).contains(&digits) {
        return Err(LibError::InvalidInput(format!(
            "phone number must have 8 to 20 digits, got {}",
            digits
        )));
    }
    Ok(trimmed.to_string())
}

/// Trims tags, drops blanks, and removes case-insensitive duplicates while
/// keeping first-seen order.
pub fn validate_tags<S: AsRef<str>>(input: &[S]) -> Result<Vec<String>, LibError> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input {
        let tag = raw.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        if tag.len() > MAX_TAG_LENGTH {
            return Err(LibError::InvalidInput(format!(
                "tag '{}' exceeds maximum length of {} bytes",
                tag, MAX_TAG_LENGTH
            )));
        }
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

/// Record ids are opaque: numeric on most deployments, UUID-like on others.
/// Anything non-blank made of ASCII letters, digits, `-` or `_` is accepted;
/// ids are placed in URL paths, so other characters are refused.
pub fn validate_id(input: &str) -> Result<Id, LibError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(LibError::InvalidInput("id cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(LibError::InvalidInput(format!(
            "id exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LibError::InvalidInput(format!(
            "invalid id '{}': only letters, digits, '-' and '_' are allowed",
            input
        )));
    }
    Ok(Id::from(id))
}
