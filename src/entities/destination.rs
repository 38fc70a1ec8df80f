// 📍 Destination Entity - one stop within an itinerary

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub itinerary_id: i64,
}

impl Destination {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() || self.name.len() > 200 {
            return Err("Destination name must be between 1 and 200 characters".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        let mut dest = Destination {
            id: 1,
            name: "Seattle".to_string(),
            itinerary_id: 1,
        };
        assert!(dest.validate().is_ok());

        dest.name = String::new();
        assert!(dest.validate().is_err());

        dest.name = "x".repeat(201);
        assert!(dest.validate().is_err());
    }
}
