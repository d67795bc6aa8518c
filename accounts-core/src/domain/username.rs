use std::fmt;

use crate::domain::user::UserError;

pub const MAX_USERNAME_LENGTH: usize = 50;

/// Validated unique handle for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingUsername);
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UserError::UsernameTooLong);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserError::UsernameContainsWhitespace);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_handles() {
        let username = Username::try_from("alice_42".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice_42");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let username = Username::try_from("  bob  ".to_string()).unwrap();
        assert_eq!(username.as_str(), "bob");
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Username::try_from(String::new()),
            Err(UserError::MissingUsername)
        ));
    }

    #[test]
    fn rejects_too_long() {
        let long = "x".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(matches!(
            Username::try_from(long),
            Err(UserError::UsernameTooLong)
        ));
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!(matches!(
            Username::try_from("alice smith".to_string()),
            Err(UserError::UsernameContainsWhitespace)
        ));
    }
}
