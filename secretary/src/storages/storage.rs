use std::{path::Path, sync::Arc};

use crate::{
    error::StorageError,
    storages::{
        ProductStorage, ProductStorageTrait, SalaryStorage, SalaryStorageTrait, SqliteStorage,
    },
};

/// Connectivity check of the storage backend
#[async_trait::async_trait]
pub trait HealthCheckTrait: Send + Sync {
    async fn ping(&self) -> Result<(), StorageError>;
}

/// In-memory storages are always reachable
struct InMemoryHealthCheck;

#[async_trait::async_trait]
impl HealthCheckTrait for InMemoryHealthCheck {
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Combined storage trait that provides all storage operations
/// This trait allows converting to specific trait objects for functions that only need subset of functionality
pub trait StorageTrait: Send + Sync {
    /// Convert to ProductStorageTrait trait object
    fn as_product_storage(self: Arc<Self>) -> Arc<dyn ProductStorageTrait>;

    /// Convert to SalaryStorageTrait trait object
    fn as_salary_storage(self: Arc<Self>) -> Arc<dyn SalaryStorageTrait>;

    /// Convert to HealthCheckTrait trait object
    fn as_health_check(self: Arc<Self>) -> Arc<dyn HealthCheckTrait>;
}

/// Main storage structure that holds all bot data
#[derive(Clone)]
pub struct Storage {
    products: Arc<dyn ProductStorageTrait>,
    salaries: Arc<dyn SalaryStorageTrait>,
    health: Arc<dyn HealthCheckTrait>,
}

impl Storage {
    /// Create a new storage with all storage types initialized (in-memory)
    pub fn new() -> Self {
        Self {
            products: Arc::new(ProductStorage::new()),
            salaries: Arc::new(SalaryStorage::new()),
            health: Arc::new(InMemoryHealthCheck),
        }
    }

    /// Storage with every part backed by one SQLite database file
    pub fn sqlite(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let database = SqliteStorage::open(path)?;
        Ok(Self::new()
            .products_storage(database.clone())
            .salaries_storage(database.clone())
            .health_check(database))
    }

    /// Builder-like method to configure product storage
    pub fn products_storage(mut self, storage: impl ProductStorageTrait + 'static) -> Self {
        self.products = Arc::new(storage);
        self
    }

    /// Builder-like method to configure salary storage
    pub fn salaries_storage(mut self, storage: impl SalaryStorageTrait + 'static) -> Self {
        self.salaries = Arc::new(storage);
        self
    }

    /// Builder-like method to configure the connectivity check
    pub fn health_check(mut self, check: impl HealthCheckTrait + 'static) -> Self {
        self.health = Arc::new(check);
        self
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageTrait for Storage {
    fn as_product_storage(self: Arc<Self>) -> Arc<dyn ProductStorageTrait> {
        self.products.clone()
    }

    fn as_salary_storage(self: Arc<Self>) -> Arc<dyn SalaryStorageTrait> {
        self.salaries.clone()
    }

    fn as_health_check(self: Arc<Self>) -> Arc<dyn HealthCheckTrait> {
        self.health.clone()
    }
}
