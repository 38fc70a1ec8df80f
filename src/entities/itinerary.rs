// 🧳 Itinerary Entity - a named trip with a date range
//
// The root of the entity graph: destinations and the packing checklist hang
// off an itinerary, and the report generator renders one itinerary per call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_id: i64,
}

impl Itinerary {
    /// Invariant: start_date ≤ end_date.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() || self.name.len() > 100 {
            return Err("Itinerary name must be between 1 and 100 characters".to_string());
        }
        if self.start_date > self.end_date {
            return Err("End date must be after start date".to_string());
        }
        Ok(())
    }

    /// Trip length in days, inclusive of both endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_itinerary(start: NaiveDate, end: NaiveDate) -> Itinerary {
        Itinerary {
            id: 1,
            name: "Pacific Northwest Loop".to_string(),
            start_date: start,
            end_date: end,
            user_id: 1,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_itinerary() {
        let it = test_itinerary(date(2026, 6, 12), date(2026, 6, 19));
        assert!(it.validate().is_ok());
        assert_eq!(it.duration_days(), 8);
    }

    #[test]
    fn test_single_day_trip_allowed() {
        let it = test_itinerary(date(2026, 6, 12), date(2026, 6, 12));
        assert!(it.validate().is_ok());
        assert_eq!(it.duration_days(), 1);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let it = test_itinerary(date(2026, 6, 19), date(2026, 6, 12));
        assert!(it.validate().is_err());
    }

    #[test]
    fn test_name_bounds() {
        let mut it = test_itinerary(date(2026, 6, 12), date(2026, 6, 19));
        it.name = String::new();
        assert!(it.validate().is_err());
        it.name = "x".repeat(101);
        assert!(it.validate().is_err());
        it.name = "x".repeat(100);
        assert!(it.validate().is_ok());
    }
}
