//! Email address type.
//!
//! Used for the order inbox that email handoffs are addressed to. Customer
//! contact emails on an order draft stay free text.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not a single local part and domain joined by @.
    #[error("email must contain exactly one @ symbol")]
    MalformedAt,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The address contains whitespace or URI delimiters.
    #[error("email contains an invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// An email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Exactly one @ with non-empty local part and domain
/// - No whitespace, `?`, `&`, or `#`, so the address can sit unencoded in
///   the path of a `mailto:` URI
///
/// ## Examples
///
/// ```
/// use sole_gifts_core::Email;
///
/// assert!(Email::parse("orders@solegifts.example").is_ok());
/// assert!(Email::parse("orders").is_err());
/// assert!(Email::parse("orders@solegifts.example?cc=x").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input violates any of the constraints above.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '?' | '&' | '#'))
        {
            return Err(EmailError::InvalidCharacter(bad));
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MalformedAt)?;
        if domain.contains('@') {
            return Err(EmailError::MalformedAt);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Email::parse("orders@solegifts.example").is_ok());
        assert!(Email::parse("hello+holiday@solegifts.co.uk").is_ok());
        assert!(Email::parse("a@b").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        let email = Email::parse("  orders@solegifts.example\n").unwrap();
        assert_eq!(email.as_str(), "orders@solegifts.example");
    }

    #[test]
    fn test_parse_rejects_shapes() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("orders"), Err(EmailError::MalformedAt));
        assert_eq!(Email::parse("a@b@c"), Err(EmailError::MalformedAt));
        assert_eq!(Email::parse("@solegifts.example"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("orders@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_rejects_uri_delimiters() {
        assert_eq!(
            Email::parse("orders@solegifts.example?bcc=x"),
            Err(EmailError::InvalidCharacter('?'))
        );
        assert_eq!(
            Email::parse("or ders@solegifts.example"),
            Err(EmailError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@solegifts.example", "a".repeat(250));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong { .. })));
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(parsed.is_err());
    }
}
