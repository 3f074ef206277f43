//! Time slot model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named serving window (e.g. "Lunch", "Dinner 18:00-20:00") that
/// sessions are scheduled against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique identifier (UUID)
    pub id: String,
    /// Display name of the slot
    pub slot_name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Create a new TimeSlot with a generated id.
    pub fn new(slot_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slot_name,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_new() {
        let slot = TimeSlot::new("Dinner".to_string());

        assert!(!slot.id.is_empty());
        assert_eq!(slot.slot_name, "Dinner");
    }

    #[test]
    fn test_time_slot_serialize_keys() {
        let slot = TimeSlot::new("Lunch".to_string());
        let json = serde_json::to_value(&slot).expect("Failed to serialize");

        assert_eq!(json["slot_name"], "Lunch");
        assert!(json.get("created_at").is_some());
    }
}
