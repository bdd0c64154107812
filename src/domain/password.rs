use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

/// Plaintext password as supplied by a caller. Never persisted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Password {
    pub fn parse(s: Secret<String>) -> Result<Password, ValidationError> {
        validate_password(&s)?;
        Ok(Self(s))
    }
}

const MAX_PASSWORD_CHARACTERS: usize = 128;

fn validate_password(s: &Secret<String>) -> Result<(), ValidationError> {
    let char_count = s.expose_secret().chars().count();

    if char_count == 0 {
        return Err(ValidationError::new(
            "Password must not be empty.".to_owned(),
        ));
    }

    if char_count > MAX_PASSWORD_CHARACTERS {
        return Err(ValidationError::new(format!(
            "Password too long. Should be at most {} characters.",
            MAX_PASSWORD_CHARACTERS
        )));
    }

    Ok(())
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
