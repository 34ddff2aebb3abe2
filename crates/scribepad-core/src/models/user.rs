use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Name for the title bar, falling back to the email address
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_camel_case() {
        let json = r#"{
            "_id": "665f1c",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "profileImage": "ada.png",
            "password": "ignored"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_deref(), Some("665f1c"));
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.profile_image.as_deref(), Some("ada.png"));
    }

    #[test]
    fn test_user_display_name_falls_back_to_email() {
        let user = User {
            email: "ghost@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ghost@example.com");
    }
}
