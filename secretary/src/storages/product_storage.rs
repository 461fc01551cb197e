use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error::StorageError, product::Product};

/// Trait for product storage operations
#[async_trait::async_trait]
pub trait ProductStorageTrait: Send + Sync {
    /// Check whether a product with this name is already stored
    async fn product_exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Insert a product and return its id.
    /// Fails with `StorageError::DuplicateProduct` when the name is taken.
    async fn insert_product(&self, product: &Product) -> Result<i64, StorageError>;

    /// All stored products in insertion order
    async fn list_products(&self) -> Result<Vec<Product>, StorageError>;
}

/// In-memory product storage
#[derive(Clone, Default)]
pub struct ProductStorage {
    data: Arc<Mutex<Vec<Product>>>,
}

impl ProductStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProductStorageTrait for ProductStorage {
    async fn product_exists(&self, name: &str) -> Result<bool, StorageError> {
        let storage_guard = self.data.lock().await;
        Ok(storage_guard.iter().any(|product| product.name == name))
    }

    async fn insert_product(&self, product: &Product) -> Result<i64, StorageError> {
        // Check and insert under one lock, so concurrent adds cannot both succeed
        let mut storage_guard = self.data.lock().await;
        if storage_guard.iter().any(|stored| stored.name == product.name) {
            return Err(StorageError::DuplicateProduct(product.name.clone()));
        }
        storage_guard.push(product.clone());
        Ok(storage_guard.len() as i64)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let storage_guard = self.data.lock().await;
        Ok(storage_guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let storage = ProductStorage::new();
        assert_eq!(storage.insert_product(&Product::new("rent", 500, 5)).await.unwrap(), 1);
        assert_eq!(storage.insert_product(&Product::new("gym", 25, 12)).await.unwrap(), 2);

        let products = storage.list_products().await.unwrap();
        assert_eq!(
            products,
            vec![Product::new("rent", 500, 5), Product::new("gym", 25, 12)]
        );
        assert!(storage.product_exists("gym").await.unwrap());
        assert!(!storage.product_exists("Gym").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let storage = ProductStorage::new();
        storage.insert_product(&Product::new("rent", 500, 5)).await.unwrap();

        let result = storage.insert_product(&Product::new("rent", 1, 1)).await;
        assert!(matches!(result, Err(StorageError::DuplicateProduct(name)) if name == "rent"));
        assert_eq!(storage.list_products().await.unwrap().len(), 1);
    }
}
