use super::ValidationError;

/// How `UserService::update_user` treats the password and the role set.
///
/// `Compatible` compares the incoming plaintext with the stored hash string,
/// so the password is rehashed on practically every update, and it always
/// empties the role set. `Corrected` rehashes only when the incoming password
/// does not verify against the stored hash and leaves roles untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    #[default]
    Compatible,
    Corrected,
}

impl UpdateMode {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "compatible" => Ok(Self::Compatible),
            "corrected" => Ok(Self::Corrected),
            other => Err(ValidationError::new(format!(
                "Unknown update mode: {}. Expected compatible or corrected.",
                other
            ))),
        }
    }
}
