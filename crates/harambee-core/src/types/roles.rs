//! Membership roles.
//!
//! Roles are not linearly ordered: `admin`/`superadmin` have full access,
//! the rest are scoped to a feature area. A raw role string that does not name
//! a known role is kept as `RoleClaim::Unrecognized` and treated as `member`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    ProjectManager,
    Supervisor,
    Admin,
    Superadmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Self::Member,
        Self::ProjectManager,
        Self::Supervisor,
        Self::Admin,
        Self::Superadmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::ProjectManager => "project_manager",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Case-insensitive lookup of a role name.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|r| r.as_str() == normalized)
    }

    /// Admins see every page and every built-in module.
    pub fn is_full_access(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role as claimed by the membership record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleClaim {
    Known(Role),
    /// Raw value that did not match any role. Resolves to `Role::Member`.
    Unrecognized(String),
}

impl RoleClaim {
    pub fn parse(raw: &str) -> Self {
        match Role::from_name(raw) {
            Some(role) => Self::Known(role),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    /// The role policy decisions are made against.
    pub fn effective(&self) -> Role {
        match self {
            Self::Known(role) => *role,
            Self::Unrecognized(_) => Role::Member,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Role> for RoleClaim {
    fn from(role: Role) -> Self {
        Self::Known(role)
    }
}
