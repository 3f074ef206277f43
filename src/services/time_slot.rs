//! Time slot service

use crate::db::repositories::TimeSlotRepository;
use crate::models::TimeSlot;
use anyhow::Result;
use std::sync::Arc;

pub struct TimeSlotService {
    repo: Arc<dyn TimeSlotRepository>,
}

impl TimeSlotService {
    pub fn new(repo: Arc<dyn TimeSlotRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<TimeSlot>> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxTimeSlotRepository;
    use crate::db::{create_test_pool, migrations};

    #[tokio::test]
    async fn test_list_returns_slots_oldest_first() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let repo = SqlxTimeSlotRepository::boxed(pool);
        let service = TimeSlotService::new(repo.clone());

        let mut lunch = TimeSlot::new("Lunch".to_string());
        lunch.created_at = chrono::Utc::now() - chrono::Duration::seconds(10);
        repo.create(&lunch).await.expect("Failed to create slot");
        repo.create(&TimeSlot::new("Dinner".to_string()))
            .await
            .expect("Failed to create slot");

        let slots = service.list().await.expect("Failed to list slots");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot_name, "Lunch");
        assert_eq!(slots[1].slot_name, "Dinner");
    }
}
