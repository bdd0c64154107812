use std::collections::HashSet;

use super::{Authority, Email, User, UserPasswordHash};

/// Read-only view of a user handed to the authentication layer.
///
/// The four gating flags all mirror `User::enabled`; they are kept apart so
/// callers can check each one the way an authenticator expects to.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticationPrincipal {
    pub username: Email,
    pub password_hash: UserPasswordHash,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
    pub account_non_locked: bool,
    pub authorities: HashSet<Authority>,
}

impl From<&User> for AuthenticationPrincipal {
    fn from(user: &User) -> Self {
        Self {
            username: user.email.clone(),
            password_hash: user.hash.clone(),
            enabled: user.enabled,
            account_non_expired: user.enabled,
            credentials_non_expired: user.enabled,
            account_non_locked: user.enabled,
            authorities: user
                .roles
                .iter()
                .map(|role| role.authority.clone())
                .collect(),
        }
    }
}

impl AuthenticationPrincipal {
    pub fn is_usable(&self) -> bool {
        self.enabled
            && self.account_non_expired
            && self.credentials_non_expired
            && self.account_non_locked
    }
}
