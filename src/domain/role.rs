use std::hash::Hash;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new(
                "Role name cannot be empty".to_owned(),
            ));
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<String> for RoleName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability label granted to the holders of a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority(String);

impl Authority {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl AsRef<String> for Authority {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// A role is identified by its name alone: two roles with the same name are
/// the same role, whatever their authority says.
#[derive(Debug, Clone)]
pub struct Role {
    pub name: RoleName,
    pub authority: Authority,
}

impl Role {
    pub fn new(name: RoleName, authority: Authority) -> Self {
        Self { name, authority }
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
