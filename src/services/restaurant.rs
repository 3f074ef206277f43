//! Restaurant service

use crate::db::repositories::RestaurantRepository;
use crate::models::{Restaurant, RestaurantSummary};
use anyhow::Result;
use std::sync::Arc;

pub struct RestaurantService {
    repo: Arc<dyn RestaurantRepository>,
}

impl RestaurantService {
    pub fn new(repo: Arc<dyn RestaurantRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Restaurant>> {
        self.repo.list().await
    }

    /// Look up the restaurant linked to a user, reduced to id and name.
    pub async fn get_summary_for_user(&self, user_id: &str) -> Result<Option<RestaurantSummary>> {
        let restaurant = self.repo.get_for_user(user_id).await?;

        Ok(restaurant.map(|r| RestaurantSummary {
            id: r.id,
            name: r.name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxRestaurantRepository, SqlxUserRepository, UserRepository};
    use crate::db::{create_test_pool, migrations, DynDatabasePool};
    use crate::models::{User, UserRole};

    async fn setup() -> (DynDatabasePool, RestaurantService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let service = RestaurantService::new(SqlxRestaurantRepository::boxed(pool.clone()));
        (pool, service)
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_pool, service) = setup().await;

        let restaurants = service.list().await.expect("Failed to list restaurants");
        assert!(restaurants.is_empty());
    }

    #[tokio::test]
    async fn test_get_summary_for_user() {
        let (pool, service) = setup().await;
        let repo = SqlxRestaurantRepository::new(pool.clone());

        let restaurant = repo
            .create(&Restaurant::new("Cafe".to_string(), "Town".to_string()))
            .await
            .expect("Failed to create restaurant");

        let user = SqlxUserRepository::new(pool.clone())
            .create(&User::new(
                "owner".to_string(),
                "owner@example.com".to_string(),
                "hash".to_string(),
                String::new(),
                UserRole::User,
            ))
            .await
            .expect("Failed to create user");

        assert!(service
            .get_summary_for_user(&user.id)
            .await
            .expect("Failed to look up restaurant")
            .is_none());

        repo.link_user(&user.id, &restaurant.id)
            .await
            .expect("Failed to link user");

        let summary = service
            .get_summary_for_user(&user.id)
            .await
            .expect("Failed to look up restaurant")
            .expect("Summary should exist");

        assert_eq!(summary.id, restaurant.id);
        assert_eq!(summary.name, "Cafe");

        // The link is directional: the restaurant id is not a user id
        assert!(service
            .get_summary_for_user(&restaurant.id)
            .await
            .expect("Failed to look up restaurant")
            .is_none());
    }
}
