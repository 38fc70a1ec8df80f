// 👤 User Entity - owner of itineraries
//
// Authentication (passwords, sessions) lives outside this crate; the report
// and the API only need the owner's identity and display name.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
        .expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() {
            return Err("Username is required".to_string());
        }
        if self.username.len() > 50 {
            return Err("Username must be less than 50 characters".to_string());
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err("Invalid email format".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(username: &str, email: &str) -> User {
        User {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(test_user("maria_v", "maria@example.com").validate().is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(test_user("", "maria@example.com").validate().is_err());
    }

    #[test]
    fn test_long_username_rejected() {
        let name = "x".repeat(51);
        assert!(test_user(&name, "maria@example.com").validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(test_user("maria_v", "not-an-email").validate().is_err());
        assert!(test_user("maria_v", "maria@nodot").validate().is_err());
    }
}
