use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::StorageError, storages::SalaryStorageTrait};

/// A recurring income; its payment day is a pay period boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub name: String,
    pub sum: i64,
    pub payment_day: u32,
}

impl Salary {
    pub fn new(name: impl Into<String>, sum: i64, payment_day: u32) -> Self {
        Self {
            name: name.into(),
            sum,
            payment_day,
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.sum, self.payment_day)
    }
}

/// Insert configured salaries that are not stored yet, returning how many were added
pub async fn seed_salaries(
    storage: &dyn SalaryStorageTrait,
    salaries: &[Salary],
) -> Result<usize, StorageError> {
    let mut inserted = 0;
    for salary in salaries {
        if storage.insert_salary(salary).await? {
            log::info!("Seeded salary: {}", salary);
            inserted += 1;
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storages::SalaryStorage;

    #[tokio::test]
    async fn test_seed_salaries_is_idempotent() {
        let storage = SalaryStorage::new();
        let salaries = vec![Salary::new("main job", 5000, 5), Salary::new("advance", 2000, 20)];

        assert_eq!(seed_salaries(&storage, &salaries).await.unwrap(), 2);
        assert_eq!(seed_salaries(&storage, &salaries).await.unwrap(), 0);
        assert_eq!(storage.list_salary_payment_days().await.unwrap(), vec![5, 20]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Salary::new("main job", 5000, 5).to_string(), "main job, 5000, 5");
    }
}
