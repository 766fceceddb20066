//! User Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{domain::fields::UnknownValue, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Access role attached to an account. Staff routes accept `Staff` and
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Staff,
    Admin,
    SuperAdmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether the role grants staff-level access.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Staff | Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownValue::new("role", other)),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub loyalty_points: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Customer, Role::Staff, Role::Admin, Role::SuperAdmin] {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn staff_check_covers_elevated_roles() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Staff.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::SuperAdmin.is_staff());
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("barista".parse::<Role>().is_err());
    }
}
