//! Restaurant model
//!
//! This module defines the Restaurant entity, the top-level venue that
//! sessions and tables belong to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Restaurant entity representing a bookable venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier (UUID)
    pub id: String,
    /// Restaurant name
    pub name: String,
    /// Physical location
    pub location: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Contact email address
    #[serde(default)]
    pub email: String,
    /// Whether the restaurant is accepting bookings
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Restaurant {
    /// Create a new Restaurant with a generated id.
    pub fn new(name: String, location: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            location,
            description: String::new(),
            phone: String::new(),
            email: String::new(),
            is_active: true,
        }
    }
}

/// Reduced restaurant view returned by the owning-user lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSummary {
    /// Restaurant id
    pub id: String,
    /// Restaurant name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_new() {
        let restaurant = Restaurant::new("The Riverside".to_string(), "12 Quay St".to_string());

        assert!(!restaurant.id.is_empty());
        assert_eq!(restaurant.name, "The Riverside");
        assert_eq!(restaurant.location, "12 Quay St");
        assert!(restaurant.is_active);
        assert!(restaurant.description.is_empty());
    }

    #[test]
    fn test_restaurant_ids_are_unique() {
        let a = Restaurant::new("A".to_string(), "loc".to_string());
        let b = Restaurant::new("B".to_string(), "loc".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_restaurant_deserialize_defaults() {
        let json = r#"{"id":"r-1","name":"Cafe","location":"Town"}"#;
        let restaurant: Restaurant = serde_json::from_str(json).expect("Failed to deserialize");

        assert!(restaurant.is_active);
        assert_eq!(restaurant.description, "");
        assert_eq!(restaurant.phone, "");
    }

    #[test]
    fn test_restaurant_summary_serialize() {
        let summary = RestaurantSummary {
            id: "r-1".to_string(),
            name: "Cafe".to_string(),
        };
        let json = serde_json::to_value(&summary).expect("Failed to serialize");
        assert_eq!(json["id"], "r-1");
        assert_eq!(json["name"], "Cafe");
        assert!(json.get("location").is_none());
    }
}
