use std::{path::Path, sync::Arc};

use rusqlite::{Connection, Row, params};
use tokio::sync::Mutex;

use super::{HealthCheckTrait, ProductStorageTrait, SalaryStorageTrait};
use crate::{error::StorageError, product::Product, salary::Salary};

/// Relational storage backed by a single SQLite connection
#[derive(Clone)]
pub struct SqliteStorage {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self, StorageError> {
        init_schema(&connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Run a blocking query on the blocking thread pool, holding the connection lock
    async fn with_connection<T, F>(&self, query: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || query(&connection))
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))?
    }
}

fn init_schema(connection: &Connection) -> rusqlite::Result<()> {
    connection.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS products(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        sum INTEGER NOT NULL,
        payment_day INTEGER NOT NULL CHECK(payment_day BETWEEN 1 AND 31)
    );

    CREATE TABLE IF NOT EXISTS salaries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        sum INTEGER NOT NULL,
        payment_day INTEGER NOT NULL CHECK(payment_day BETWEEN 1 AND 31)
    );
    "#,
    )
}

fn map_product_row(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        name: row.get(0)?,
        sum: row.get(1)?,
        payment_day: row.get(2)?,
    })
}

fn map_salary_row(row: &Row) -> rusqlite::Result<Salary> {
    Ok(Salary {
        name: row.get(0)?,
        sum: row.get(1)?,
        payment_day: row.get(2)?,
    })
}

fn insert_product(connection: &Connection, product: &Product) -> Result<i64, StorageError> {
    connection
        .execute(
            "INSERT INTO products(name, sum, payment_day) VALUES (?1, ?2, ?3)",
            params![product.name, product.sum, product.payment_day],
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => StorageError::DuplicateProduct(product.name.clone()),
            error => error.into(),
        })?;
    Ok(connection.last_insert_rowid())
}

fn list_products(connection: &Connection) -> rusqlite::Result<Vec<Product>> {
    let mut statement =
        connection.prepare("SELECT name, sum, payment_day FROM products ORDER BY id")?;
    let products = statement
        .query_map([], map_product_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(products)
}

fn list_salaries(connection: &Connection) -> rusqlite::Result<Vec<Salary>> {
    let mut statement =
        connection.prepare("SELECT name, sum, payment_day FROM salaries ORDER BY id")?;
    let salaries = statement
        .query_map([], map_salary_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(salaries)
}

fn list_salary_payment_days(connection: &Connection) -> rusqlite::Result<Vec<u32>> {
    let mut statement = connection
        .prepare("SELECT DISTINCT payment_day FROM salaries ORDER BY payment_day")?;
    let days = statement
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<u32>>>()?;
    Ok(days)
}

#[async_trait::async_trait]
impl ProductStorageTrait for SqliteStorage {
    async fn product_exists(&self, name: &str) -> Result<bool, StorageError> {
        let name = name.to_string();
        self.with_connection(move |connection| {
            let exists = connection.query_row(
                "SELECT EXISTS(SELECT 1 FROM products WHERE name = ?1)",
                params![name],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn insert_product(&self, product: &Product) -> Result<i64, StorageError> {
        let product = product.clone();
        self.with_connection(move |connection| insert_product(connection, &product))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        self.with_connection(|connection| Ok(list_products(connection)?))
            .await
    }
}

#[async_trait::async_trait]
impl SalaryStorageTrait for SqliteStorage {
    async fn list_salary_payment_days(&self) -> Result<Vec<u32>, StorageError> {
        self.with_connection(|connection| Ok(list_salary_payment_days(connection)?))
            .await
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, StorageError> {
        self.with_connection(|connection| Ok(list_salaries(connection)?))
            .await
    }

    async fn insert_salary(&self, salary: &Salary) -> Result<bool, StorageError> {
        let salary = salary.clone();
        self.with_connection(move |connection| {
            let inserted = connection.execute(
                "INSERT OR IGNORE INTO salaries(name, sum, payment_day) VALUES (?1, ?2, ?3)",
                params![salary.name, salary.sum, salary.payment_day],
            )?;
            Ok(inserted == 1)
        })
        .await
    }
}

#[async_trait::async_trait]
impl HealthCheckTrait for SqliteStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        self.with_connection(|connection| {
            connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SqliteStorage {
        SqliteStorage::open_in_memory().expect("in-memory database")
    }

    #[tokio::test]
    async fn test_insert_and_list_products() {
        let storage = storage();
        let first = storage.insert_product(&Product::new("rent", 500, 5)).await.unwrap();
        let second = storage.insert_product(&Product::new("gym", 25, 12)).await.unwrap();
        assert!(second > first);

        assert_eq!(
            storage.list_products().await.unwrap(),
            vec![Product::new("rent", 500, 5), Product::new("gym", 25, 12)]
        );
        assert!(storage.product_exists("rent").await.unwrap());
        assert!(!storage.product_exists("car").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_constraint_maps_to_duplicate_error() {
        let storage = storage();
        storage.insert_product(&Product::new("rent", 500, 5)).await.unwrap();

        let result = storage.insert_product(&Product::new("rent", 700, 6)).await;
        assert!(matches!(result, Err(StorageError::DuplicateProduct(name)) if name == "rent"));
        assert_eq!(storage.list_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_bad_day() {
        let storage = storage();
        let result = storage.insert_product(&Product::new("broken", 1, 40)).await;
        assert!(matches!(result, Err(StorageError::Database(_))));
    }

    #[tokio::test]
    async fn test_salaries() {
        let storage = storage();
        assert!(storage.insert_salary(&Salary::new("advance", 400, 25)).await.unwrap());
        assert!(storage.insert_salary(&Salary::new("main", 1000, 10)).await.unwrap());
        assert!(storage.insert_salary(&Salary::new("bonus", 50, 10)).await.unwrap());
        assert!(!storage.insert_salary(&Salary::new("main", 1, 1)).await.unwrap());

        assert_eq!(storage.list_salary_payment_days().await.unwrap(), vec![10, 25]);
        assert_eq!(storage.list_salaries().await.unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_adds_of_same_name_insert_once() {
        let storage = storage();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move { storage.insert_product(&Product::new("rent", i, 5)).await })
            })
            .collect();

        let mut inserted = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => inserted += 1,
                Err(StorageError::DuplicateProduct(name)) => assert_eq!(name, "rent"),
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(storage.list_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(storage().ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_schema_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("secretary-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("reopen.sqlite");
        let _ = std::fs::remove_file(&path);

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.insert_product(&Product::new("rent", 500, 5)).await.unwrap();
        }
        let storage = SqliteStorage::open(&path).unwrap();
        assert!(storage.product_exists("rent").await.unwrap());

        let _ = std::fs::remove_file(&path);
    }
}
