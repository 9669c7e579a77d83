//! Email Address

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

use std::{fmt, str::FromStr};

use thiserror::Error;

use EmailAddressError::*;

/// An error that can occur when creating an email address
#[derive(Debug, Error)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid")]
    InvalidEmailAddress,
}

/// An email address with an optional display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
    display_name: Option<String>,
}

impl EmailAddress {
    /// Create a new email address.
    ///
    /// Accepts either a bare `local@domain` address or the
    /// `Display Name <local@domain>` form, with optional quotes around the
    /// display name.
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        if let Some(start) = trimmed.find('<') {
            let rest = trimmed.strip_suffix('>').ok_or(InvalidEmailAddress)?;

            let display_name = rest[..start].trim().trim_matches('"').trim();
            let address = validated(&rest[start + 1..])?;

            return Ok(Self {
                address,
                display_name: if display_name.is_empty() {
                    None
                } else {
                    Some(display_name.to_string())
                },
            });
        }

        Ok(Self {
            address: validated(trimmed)?,
            display_name: None,
        })
    }

    /// Create a new email address with a display name
    pub fn with_display_name(raw: &str, display_name: &str) -> Result<Self, EmailAddressError> {
        Ok(Self {
            address: validated(raw)?,
            display_name: Some(display_name.to_string()),
        })
    }

    /// Create a new email address without validating it
    pub fn new_unchecked(raw: &str) -> Self {
        Self {
            address: raw.trim().to_string(),
            display_name: None,
        }
    }

    /// Get the bare `local@domain` address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the display name, if one is set
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

fn validated(raw: &str) -> Result<String, EmailAddressError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(EmptyEmailAddress);
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(InvalidEmailAddress);
    }

    Ok(trimmed.to_string())
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(display_name) => write!(f, "{} <{}>", display_name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl FromStr for EmailAddress {
    type Err = EmailAddressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.address
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_email_address_display() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(format!("{}", email), "email@example.com".to_string());

        Ok(())
    }

    #[test]
    fn test_empty_email_address_is_invalid() {
        let result = EmailAddress::new("");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), EmptyEmailAddress));
    }

    #[test]
    fn test_email_address_without_at_symbol_is_invalid() {
        let result = EmailAddress::new("not-an-address");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), InvalidEmailAddress));
    }

    #[test]
    fn test_email_address_without_domain_dot_is_invalid() {
        let result = EmailAddress::new("email@localhost");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), InvalidEmailAddress));
    }

    #[test]
    fn test_valid_email_to_string() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(String::from(email), "email@example.com".to_string());

        Ok(())
    }

    #[test]
    fn test_parses_display_name_form() -> TestResult {
        let email = EmailAddress::new("Jane Doe <jane@example.com>")?;

        assert_eq!(email.address(), "jane@example.com");
        assert_eq!(email.display_name(), Some("Jane Doe"));

        Ok(())
    }

    #[test]
    fn test_parses_quoted_display_name_form() -> TestResult {
        let email = EmailAddress::new("\"Doe, Jane\" <jane@example.com>")?;

        assert_eq!(email.address(), "jane@example.com");
        assert_eq!(email.display_name(), Some("Doe, Jane"));

        Ok(())
    }

    #[test]
    fn test_angle_bracket_without_closing_is_invalid() {
        let result = EmailAddress::new("Jane Doe <jane@example.com");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), InvalidEmailAddress));
    }

    #[test]
    fn test_with_display_name_renders_both_parts() -> TestResult {
        let email = EmailAddress::with_display_name("jane@example.com", "Jane Doe")?;

        assert_eq!(format!("{}", email), "Jane Doe <jane@example.com>");

        Ok(())
    }

    #[test]
    fn test_from_str_round_trips() -> TestResult {
        let email: EmailAddress = "email@example.com".parse()?;

        assert_eq!(email.address(), "email@example.com");

        Ok(())
    }
}
