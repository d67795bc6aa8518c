use secrecy::Secret;

use crate::domain::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Plaintext password in transit. Only ever stored as an argon2 hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        use secrecy::ExposeSecret;

        if value.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_characters() {
        assert!(Password::try_from(Secret::from("password".to_string())).is_ok());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(matches!(
            Password::try_from(Secret::from("seven77".to_string())),
            Err(UserError::PasswordTooShort)
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::try_from(Secret::from("hunter22".to_string())).unwrap();
        assert!(!format!("{password:?}").contains("hunter22"));
    }
}
