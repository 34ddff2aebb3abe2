use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetPasswordResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Registration form; the server emails a set-password link afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parse() {
        let json = r#"{
            "message": "Login successful",
            "token": "jwt.token.value",
            "user": {"_id": "u1", "firstName": "Ada", "lastName": "L", "email": "ada@example.com"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "jwt.token.value");
        assert_eq!(resp.user.email, "ada@example.com");
    }

    #[test]
    fn test_set_password_response_without_user() {
        let resp: SetPasswordResponse = serde_json::from_str(r#"{"message": "Password set"}"#).unwrap();
        assert_eq!(resp.message, "Password set");
        assert!(resp.user.is_none());
    }
}
