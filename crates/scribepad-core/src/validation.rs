//! Client-side form checks.
//!
//! Each form reports at most one problem: the first failing field in the
//! form's priority order. The server still validates everything; these checks
//! only save a round trip and put the message next to the field.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ArticleDraft, RegisterRequest};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_CONTENT_LENGTH: usize = 10;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Form field names, matching the API's JSON field names
pub mod field {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new(field::EMAIL, "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(FieldError::new(field::EMAIL, "Invalid email format"));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), FieldError> {
    if password.trim().is_empty() {
        return Err(FieldError::new(field::PASSWORD, "Password is required"));
    }
    if char_len(password) < MIN_PASSWORD_LENGTH {
        return Err(FieldError::new(
            field::PASSWORD,
            format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }
    Ok(())
}

fn check_name(field: &'static str, label: &str, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new(field, format!("{} is required", label)));
    }
    if char_len(value) < MIN_NAME_LENGTH {
        return Err(FieldError::new(
            field,
            format!("Minimum {} characters are required", MIN_NAME_LENGTH),
        ));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FieldError> {
    check_email(email)?;
    check_password(password)
}

pub fn validate_register(request: &RegisterRequest) -> Result<(), FieldError> {
    check_name(field::FIRST_NAME, "First Name", &request.first_name)?;
    check_name(field::LAST_NAME, "Last Name", &request.last_name)?;
    check_email(&request.email)
}

pub fn validate_set_password(password: &str) -> Result<(), FieldError> {
    check_password(password)
}

pub fn validate_article(draft: &ArticleDraft) -> Result<(), FieldError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(FieldError::new(field::TITLE, "Title is required"));
    }
    if char_len(title) < MIN_TITLE_LENGTH {
        return Err(FieldError::new(
            field::TITLE,
            format!("Title must be at least {} characters", MIN_TITLE_LENGTH),
        ));
    }
    if char_len(title) > MAX_TITLE_LENGTH {
        return Err(FieldError::new(
            field::TITLE,
            format!("Title must be less than {} characters", MAX_TITLE_LENGTH),
        ));
    }

    let content = draft.content.trim();
    if content.is_empty() {
        return Err(FieldError::new(field::CONTENT, "Content is required"));
    }
    if char_len(content) < MIN_CONTENT_LENGTH {
        return Err(FieldError::new(
            field::CONTENT,
            format!("Content must be at least {} characters", MIN_CONTENT_LENGTH),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleStatus;

    fn draft(title: &str, content: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            content: content.to_string(),
            status: ArticleStatus::Published,
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example.c"));
    }

    #[test]
    fn test_login_reports_email_first() {
        let err = validate_login("", "").unwrap_err();
        assert_eq!(err.field, field::EMAIL);
        assert_eq!(err.message, "Email is required");

        let err = validate_login("nope", "").unwrap_err();
        assert_eq!(err.message, "Invalid email format");
    }

    #[test]
    fn test_login_password_rules() {
        let err = validate_login("ada@example.com", "   ").unwrap_err();
        assert_eq!(err.field, field::PASSWORD);
        assert_eq!(err.message, "Password is required");

        let err = validate_login("ada@example.com", "12345").unwrap_err();
        assert_eq!(err.message, "Password must be at least 6 characters long");

        assert!(validate_login(" ada@example.com ", "123456").is_ok());
    }

    #[test]
    fn test_register_priority() {
        let mut request = RegisterRequest::default();
        assert_eq!(validate_register(&request).unwrap_err().field, field::FIRST_NAME);

        request.first_name = "A".to_string();
        let err = validate_register(&request).unwrap_err();
        assert_eq!(err.field, field::FIRST_NAME);
        assert_eq!(err.message, "Minimum 2 characters are required");

        request.first_name = "Ada".to_string();
        let err = validate_register(&request).unwrap_err();
        assert_eq!(err.field, field::LAST_NAME);
        assert_eq!(err.message, "Last Name is required");

        request.last_name = "Lovelace".to_string();
        assert_eq!(validate_register(&request).unwrap_err().field, field::EMAIL);

        request.email = "ada@example.com".to_string();
        assert!(validate_register(&request).is_ok());
    }

    #[test]
    fn test_set_password() {
        assert!(validate_set_password("").is_err());
        assert!(validate_set_password("secret1").is_ok());
    }

    #[test]
    fn test_article_title_bounds() {
        assert_eq!(
            validate_article(&draft("", "long enough body")).unwrap_err().message,
            "Title is required"
        );
        assert_eq!(
            validate_article(&draft("ab", "long enough body")).unwrap_err().message,
            "Title must be at least 3 characters"
        );
        let long_title = "t".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            validate_article(&draft(&long_title, "long enough body")).unwrap_err().message,
            "Title must be less than 100 characters"
        );
        assert!(validate_article(&draft(&"t".repeat(MAX_TITLE_LENGTH), "long enough body")).is_ok());
    }

    #[test]
    fn test_article_content_rules() {
        let err = validate_article(&draft("Title", "  ")).unwrap_err();
        assert_eq!(err.field, field::CONTENT);
        assert_eq!(err.message, "Content is required");

        let err = validate_article(&draft("Title", "too short")).unwrap_err();
        assert_eq!(err.message, "Content must be at least 10 characters");
    }

    #[test]
    fn test_lengths_count_characters() {
        // Three multi-byte characters are a valid title
        assert!(validate_article(&draft("äöü", "ten chars!")).is_ok());
    }
}
