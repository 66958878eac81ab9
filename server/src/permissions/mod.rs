//! Role Hierarchy
//!
//! Fixed partial order over site roles used for authorization checks.

mod guard;

use serde::{Deserialize, Serialize};

pub use guard::{AdminUser, GuardError};

/// Site-wide role of a principal.
///
/// Ordered `Root > Admin > Moderator > User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Root,
    Admin,
    Moderator,
    User,
}

impl Role {
    /// Roles strictly dominated by this role. An explicit table, not a
    /// computed closure.
    const fn dominates(self) -> &'static [Self] {
        match self {
            Self::Root => &[Self::Admin, Self::Moderator, Self::User],
            Self::Admin => &[Self::Moderator, Self::User],
            Self::Moderator => &[Self::User],
            Self::User => &[],
        }
    }

    /// Whether this role meets a requirement of `required`.
    ///
    /// Reflexive: every role satisfies itself.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self == required || self.dominates().contains(&required)
    }
}

/// Whether an optional role meets a requirement.
///
/// An absent principal never satisfies anything.
#[must_use]
pub fn satisfies(actual: Option<Role>, required: Role) -> bool {
    actual.is_some_and(|role| role.satisfies(required))
}
