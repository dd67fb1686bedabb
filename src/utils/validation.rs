use crate::utils::error::{DrawError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| DrawError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            if local.is_empty() || domain.is_empty() {
                return Err(invalid("Email address is missing a local part or domain"));
            }
            if !domain.contains('.') || value.contains(char::is_whitespace) {
                return Err(invalid("Email address is malformed"));
            }
            Ok(())
        }
        _ => Err(invalid("Email address must contain exactly one '@'")),
    }
}

pub fn validate_unique_ids<'a, I>(field_name: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DrawError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Identifier appears more than once".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DrawError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DrawError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("participants.email", "alice@example.com").is_ok());
        assert!(validate_email("participants.email", "a.b+c@mail.example.org").is_ok());
        assert!(validate_email("participants.email", "").is_err());
        assert!(validate_email("participants.email", "no-at-sign").is_err());
        assert!(validate_email("participants.email", "two@@example.com").is_err());
        assert!(validate_email("participants.email", "alice@localhost").is_err());
        assert!(validate_email("participants.email", "alice @example.com").is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        assert!(validate_unique_ids("participants.id", ["a", "b", "c"]).is_ok());
        assert!(validate_unique_ids("participants.id", ["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("smtp.port", 587u16, 1, 65535).is_ok());
        assert!(validate_range("smtp.port", 0u16, 1, 65535).is_err());
        assert!(validate_range("draw.max_attempts", 5000u32, 1, u32::MAX).is_ok());
    }
}
