use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routes::{ADMIN_LANDING, USER_LANDING};

/// Role of an authenticated principal.
///
/// The set is closed. For route access `Admin` is a superset of `User`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role meets `required`.
    pub fn satisfies(&self, required: RequiredRole) -> bool {
        match required {
            RequiredRole::Any => true,
            RequiredRole::User => matches!(self, Role::User | Role::Admin),
            RequiredRole::Admin => self.is_admin(),
        }
    }

    /// Where a principal with this role lands after a wrong-role redirect.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => ADMIN_LANDING,
            Role::User => USER_LANDING,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role requirement configured on a guarded screen.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredRole {
    Admin,
    User,
    #[default]
    Any,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_a_superset_of_user() {
        assert!(Role::Admin.satisfies(RequiredRole::Admin));
        assert!(Role::Admin.satisfies(RequiredRole::User));
        assert!(Role::Admin.satisfies(RequiredRole::Any));

        assert!(!Role::User.satisfies(RequiredRole::Admin));
        assert!(Role::User.satisfies(RequiredRole::User));
        assert!(Role::User.satisfies(RequiredRole::Any));
    }

    #[test]
    fn parses_only_the_closed_set() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("Admin".parse::<Role>(), Err(UnknownRole("Admin".to_string())));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
        assert_eq!(Role::User.landing_path(), "/dashboard");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::from_str::<RequiredRole>(r#""any""#).unwrap(), RequiredRole::Any);
        assert_eq!(RequiredRole::default(), RequiredRole::Any);
    }
}
