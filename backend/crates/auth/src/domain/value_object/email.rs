//! Email Value Object
//!
//! An e-mail as the caller supplied it. No case folding or format checks,
//! matching and uniqueness are defined by the store.

use serde::{Deserialize, Serialize};

/// Email rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email, rejecting only empty input
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user+tag@example.co.jp").is_ok());
    }

    #[test]
    fn test_email_empty() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_email_kept_verbatim() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "User@Example.COM");
    }
}
