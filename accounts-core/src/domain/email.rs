use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::user::UserError;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validated, case-normalized email address.
///
/// The whole address is lowercased at construction so that equality and
/// store lookups are case-insensitive in effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl TryFrom<String> for Email {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserError::MissingEmail);
        }
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(UserError::InvalidEmail);
        }
        Ok(Self(normalized))
    }
}

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
