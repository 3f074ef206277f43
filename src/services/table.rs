//! Table service

use crate::db::repositories::TableRepository;
use crate::models::{CreateTableInput, Table, TableWithRestaurant};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct TableService {
    repo: Arc<dyn TableRepository>,
}

impl TableService {
    pub fn new(repo: Arc<dyn TableRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_with_restaurant(&self) -> Result<Vec<TableWithRestaurant>> {
        self.repo.list_with_restaurant().await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Table>> {
        self.repo.list_by_restaurant(restaurant_id).await
    }

    pub async fn create(&self, input: CreateTableInput) -> Result<Table> {
        let mut table = Table::new(input.restaurant_id, input.table_number, input.capacity);
        if let Some(status) = input.status {
            table.status = status;
        }

        self.repo.create(&table).await.context("Failed to create table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{RestaurantRepository, SqlxRestaurantRepository, SqlxTableRepository};
    use crate::db::{create_test_pool, migrations, DynDatabasePool};
    use crate::models::Restaurant;

    async fn setup() -> (DynDatabasePool, TableService, Restaurant) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let restaurant = SqlxRestaurantRepository::new(pool.clone())
            .create(&Restaurant::new("Cafe".to_string(), "Town".to_string()))
            .await
            .expect("Failed to create restaurant");

        let service = TableService::new(SqlxTableRepository::boxed(pool.clone()));
        (pool, service, restaurant)
    }

    #[tokio::test]
    async fn test_create_defaults_status_to_active() {
        let (_pool, service, restaurant) = setup().await;

        let table = service
            .create(CreateTableInput {
                restaurant_id: restaurant.id.clone(),
                table_number: "T1".to_string(),
                capacity: 4,
                status: None,
            })
            .await
            .expect("Failed to create table");

        assert_eq!(table.status, "active");
        assert_eq!(table.capacity, 4);
    }

    #[tokio::test]
    async fn test_list_with_restaurant_includes_owner() {
        let (_pool, service, restaurant) = setup().await;

        service
            .create(CreateTableInput {
                restaurant_id: restaurant.id.clone(),
                table_number: "T1".to_string(),
                capacity: 4,
                status: Some("maintenance".to_string()),
            })
            .await
            .expect("Failed to create table");

        let tables = service
            .list_with_restaurant()
            .await
            .expect("Failed to list tables");

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table.status, "maintenance");
        assert_eq!(tables[0].restaurant.name, "Cafe");
    }

    #[tokio::test]
    async fn test_list_by_restaurant_filters() {
        let (pool, service, restaurant) = setup().await;

        let other = SqlxRestaurantRepository::new(pool)
            .create(&Restaurant::new("Diner".to_string(), "City".to_string()))
            .await
            .expect("Failed to create restaurant");

        service
            .create(CreateTableInput {
                restaurant_id: restaurant.id.clone(),
                table_number: "T1".to_string(),
                capacity: 2,
                status: None,
            })
            .await
            .expect("Failed to create table");
        service
            .create(CreateTableInput {
                restaurant_id: other.id.clone(),
                table_number: "D1".to_string(),
                capacity: 6,
                status: None,
            })
            .await
            .expect("Failed to create table");

        let tables = service
            .list_by_restaurant(&restaurant.id)
            .await
            .expect("Failed to list tables");

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table_number, "T1");
    }
}
