// ✅ Packing Item Entity - one checklist row on an itinerary

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub packed: bool,
    pub itinerary_id: i64,
}

impl PackingItem {
    /// Invariant: quantity ≥ 1.
    pub fn validate(&self) -> Result<(), String> {
        if self.item_name.trim().is_empty() {
            return Err("Item name cannot be empty".to_string());
        }
        if self.quantity < 1 {
            return Err("Quantity must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(quantity: i64) -> PackingItem {
        PackingItem {
            id: 1,
            item_name: "Wool socks".to_string(),
            quantity,
            packed: false,
            itinerary_id: 1,
        }
    }

    #[test]
    fn test_valid_item() {
        assert!(test_item(4).validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(test_item(0).validate().is_err());
        assert!(test_item(-2).validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut item = test_item(1);
        item.item_name = "  ".to_string();
        assert!(item.validate().is_err());
    }
}
