//! Person model (directors and cast members)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::role::Role;

/// A person as seen through one film: their record plus the role they hold in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Person {
    /// Person ID, assigned on creation (ignored on input)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(alias = "user_name")]
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    /// Free-form date of birth
    #[serde(default, alias = "dob", alias = "birth_year")]
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Person {
    pub fn new(name: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_of_birth: date_of_birth.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_field_names() {
        let person: Person = serde_json::from_str(
            r#"{"user_name": "Marion Cotillard", "birth_year": "1975-09-30", "role": "Actor"}"#,
        )
        .unwrap();
        assert_eq!(person.name, "Marion Cotillard");
        assert_eq!(person.date_of_birth, "1975-09-30");
        assert_eq!(person.role, Some(Role::Actor));
        assert_eq!(person.id, None);
    }

    #[test]
    fn test_minimal_person() {
        let person: Person = serde_json::from_str(r#"{"name": "Nolan"}"#).unwrap();
        assert_eq!(person, Person::new("Nolan", ""));
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(Person::new("", "1970-07-30").validate().is_err());
        assert!(Person::new("Christopher Nolan", "").validate().is_ok());
    }
}
