pub mod connection;
pub mod entries;
pub mod setup;

use anyhow::{Context, Result};
use log::info;

use super::KeyValueStore;
pub use connection::{create_pool, get_connection, DbConn, DbPool};

/// Key-value store persisted in a single SQLite table.
///
/// rusqlite is blocking, so every call runs on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(database_path: &str) -> Result<Self> {
        let pool = create_pool(database_path)?;
        let mut conn = get_connection(&pool)?;
        setup::ensure_schema(&mut conn)?;

        info!("Opened store at {}", database_path);
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<usize> {
        self.with_connection(entries::count_entries).await
    }

    async fn with_connection<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut DbConn) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            operation(&mut conn)
        })
        .await
        .context("Storage task did not complete")?
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.with_connection(move |conn| entries::find_value(conn, &key))
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_connection(move |conn| entries::upsert_value(conn, &key, &value))
            .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.with_connection(move |conn| entries::delete_value(conn, &key))
            .await
    }
}
