// 🏨 Accommodation Entity - a booked stay at a destination

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub price: f64,
    pub destination_id: i64,
}

impl Accommodation {
    /// Invariants: check_in_date < check_out_date, price ≥ 0.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Accommodation name cannot be empty".to_string());
        }
        if self.address.trim().is_empty() {
            return Err("Address cannot be empty".to_string());
        }
        if self.check_in_date >= self.check_out_date {
            return Err("Check-out date must be after check-in date".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_accommodation() -> Accommodation {
        Accommodation {
            id: 1,
            name: "Hotel Ballard".to_string(),
            address: "5216 Ballard Ave NW, Seattle, WA".to_string(),
            check_in_date: date(2026, 6, 12),
            check_out_date: date(2026, 6, 15),
            price: 189.5,
            destination_id: 1,
        }
    }

    #[test]
    fn test_valid_accommodation() {
        let acc = test_accommodation();
        assert!(acc.validate().is_ok());
        assert_eq!(acc.nights(), 3);
    }

    #[test]
    fn test_checkout_must_follow_checkin() {
        let mut acc = test_accommodation();
        acc.check_out_date = acc.check_in_date;
        assert!(acc.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut acc = test_accommodation();
        acc.price = -1.0;
        assert!(acc.validate().is_err());
    }

    #[test]
    fn test_zero_price_allowed() {
        let mut acc = test_accommodation();
        acc.price = 0.0;
        assert!(acc.validate().is_ok());
    }
}
