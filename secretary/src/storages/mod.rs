mod product_storage;
mod salary_storage;
mod sqlite_storage;
mod storage;

pub use product_storage::{ProductStorage, ProductStorageTrait};
pub use salary_storage::{SalaryStorage, SalaryStorageTrait};
pub use sqlite_storage::SqliteStorage;
pub use storage::{HealthCheckTrait, Storage, StorageTrait};
