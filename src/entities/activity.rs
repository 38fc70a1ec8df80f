// 🎟️ Activity Entity - something to do at a destination
//
// Descriptions are bounded at 500 characters by the store; the report
// additionally truncates them to its own column width before wrapping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub destination_id: i64,
}

impl Activity {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Activity name cannot be empty".to_string());
        }
        if self.name.len() > 200 {
            return Err("Activity name must be between 1 and 200 characters".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description cannot be empty".to_string());
        }
        if self.description.len() > 500 {
            return Err("Description must be between 1 and 500 characters".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_activity(name: &str, description: &str) -> Activity {
        Activity {
            id: 1,
            name: name.to_string(),
            description: description.to_string(),
            destination_id: 1,
        }
    }

    #[test]
    fn test_valid_activity() {
        let act = test_activity("Pike Place Market", "Browse the stalls and watch the fish toss.");
        assert!(act.validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(test_activity("   ", "Something").validate().is_err());
    }

    #[test]
    fn test_blank_description_rejected() {
        assert!(test_activity("Walk", "   ").validate().is_err());
    }

    #[test]
    fn test_description_upper_bound() {
        let max = "d".repeat(500);
        assert!(test_activity("Walk", &max).validate().is_ok());

        let over = "d".repeat(501);
        assert!(test_activity("Walk", &over).validate().is_err());
    }
}
