use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::storages::StorageTrait;

/// Source of "today" for pay period computation
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine running the bot
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Everything a command handler needs, passed explicitly to every handler
#[derive(Clone)]
pub struct AppContext {
    pub storage: Arc<dyn StorageTrait>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    pub fn new(storage: Arc<dyn StorageTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::{salary::Salary, storages::Storage};

    /// Clock frozen at a given date
    pub struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    /// In-memory context with the given salary payment days, frozen at `today`
    pub async fn context_with_salaries(today: NaiveDate, payment_days: &[u32]) -> AppContext {
        let storage: Arc<dyn StorageTrait> = Arc::new(Storage::new());
        let salaries = storage.clone().as_salary_storage();
        for (i, &day) in payment_days.iter().enumerate() {
            salaries
                .insert_salary(&Salary::new(format!("salary {i}"), 1000, day))
                .await
                .unwrap();
        }
        AppContext::new(storage, Arc::new(FixedClock(today)))
    }
}
