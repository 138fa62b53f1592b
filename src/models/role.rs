//! Role of a person within a film

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Part a person plays in a film. Stored as its label in `film_user.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Director,
    Actor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Actor => "Actor",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Director" => Ok(Role::Director),
            "Actor" => Ok(Role::Actor),
            other => Err(AppError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link between a film and a person (`film_user` row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssociation {
    pub id: i32,
    pub film_id: i32,
    pub person_id: i32,
    pub role: Role,
    /// Billing order within the film; the director is 0
    pub position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!("Director".parse::<Role>().unwrap(), Role::Director);
        assert_eq!("Actor".parse::<Role>().unwrap(), Role::Actor);
        assert!("actor".parse::<Role>().is_err());
        assert!("Producer".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_labels_round_trip_through_display() {
        for role in [Role::Director, Role::Actor] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_json() {
        assert_eq!(serde_json::to_string(&Role::Director).unwrap(), "\"Director\"");
        assert_eq!(serde_json::from_str::<Role>("\"Actor\"").unwrap(), Role::Actor);
        assert!(serde_json::from_str::<Role>("\"Writer\"").is_err());
    }
}
