pub mod keys;
pub mod locks;
pub mod memory;
pub mod sqlite;

use std::future::Future;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{codec_context, storage_context};

pub use locks::KeyLocks;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Opaque string-keyed, string-valued device storage.
///
/// No transactions, no locking: callers that read-modify-write a key
/// serialize through [`KeyLocks`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Load and decode a JSON value, `None` when the key is absent
pub async fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    let data = serde_json::from_str(&raw)
        .with_context(|| codec_context(std::any::type_name::<T>(), key))?;
    Ok(Some(data))
}

pub async fn save_json<S, T>(store: &S, key: &str, data: &T) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(data).with_context(|| storage_context("serialize", key))?;
    store.set(key, &json).await
}
