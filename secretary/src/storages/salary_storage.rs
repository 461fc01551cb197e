use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error::StorageError, salary::Salary};

/// Trait for salary storage operations
#[async_trait::async_trait]
pub trait SalaryStorageTrait: Send + Sync {
    /// Distinct salary payment days, ascending
    async fn list_salary_payment_days(&self) -> Result<Vec<u32>, StorageError>;

    /// All stored salaries
    async fn list_salaries(&self) -> Result<Vec<Salary>, StorageError>;

    /// Insert a salary unless one with the same name exists.
    /// Returns whether the salary was inserted.
    async fn insert_salary(&self, salary: &Salary) -> Result<bool, StorageError>;
}

/// In-memory salary storage
#[derive(Clone, Default)]
pub struct SalaryStorage {
    data: Arc<Mutex<Vec<Salary>>>,
}

impl SalaryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SalaryStorageTrait for SalaryStorage {
    async fn list_salary_payment_days(&self) -> Result<Vec<u32>, StorageError> {
        let storage_guard = self.data.lock().await;
        let mut days: Vec<u32> = storage_guard.iter().map(|salary| salary.payment_day).collect();
        days.sort_unstable();
        days.dedup();
        Ok(days)
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, StorageError> {
        let storage_guard = self.data.lock().await;
        Ok(storage_guard.clone())
    }

    async fn insert_salary(&self, salary: &Salary) -> Result<bool, StorageError> {
        let mut storage_guard = self.data.lock().await;
        if storage_guard.iter().any(|stored| stored.name == salary.name) {
            return Ok(false);
        }
        storage_guard.push(salary.clone());
        Ok(true)
    }
}
