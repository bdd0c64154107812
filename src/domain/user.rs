use std::collections::HashSet;

use chrono::NaiveDate;

use super::{Email, Password, Role, UserId, UserPasswordHash};

/// Profile fields shared by every shape a user passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

impl Profile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
        }
    }
}

/// Registration input, carrying the plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: Password,
    pub profile: Profile,
    pub enabled: bool,
}

impl NewUser {
    pub fn new(
        email: Email,
        password: Password,
        profile: Profile,
        enabled: bool,
    ) -> Self {
        Self {
            email,
            password,
            profile,
            enabled,
        }
    }
}

/// A new user whose password has already been hashed, ready for the store.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub email: Email,
    pub hash: UserPasswordHash,
    pub profile: Profile,
    pub enabled: bool,
}

/// Replacement values for an existing user, identified by `id`.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub email: Email,
    pub password: Password,
    pub profile: Profile,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub hash: UserPasswordHash,
    pub profile: Profile,
    pub enabled: bool,
    pub roles: HashSet<Role>,
}

impl User {
    /// Builds a stored user from a record and its assigned id. The role set
    /// starts empty.
    pub fn from_record(id: UserId, record: NewUserRecord) -> Self {
        Self {
            id,
            email: record.email,
            hash: record.hash,
            profile: record.profile,
            enabled: record.enabled,
            roles: HashSet::new(),
        }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}
