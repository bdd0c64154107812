use color_eyre::eyre::Result;

use super::{Password, UserPasswordHash};

/// One-way, salted password hashing policy.
#[async_trait::async_trait]
pub trait PasswordHasher {
    async fn encode(&self, password: &Password) -> Result<UserPasswordHash>;

    /// Succeeds only when `candidate` hashes to `expected`.
    async fn verify(
        &self,
        expected: &UserPasswordHash,
        candidate: &Password,
    ) -> Result<()>;
}
