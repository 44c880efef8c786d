use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per storage key.
///
/// Holding the guard across a read-modify-write keeps a single writer per
/// key inside this process. Other processes sharing the same store are not
/// covered; their writes can still overwrite ours.
///
/// Entries nobody holds or waits on are pruned whenever a lock is taken.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self.lock_for(key).await;
        lock.lock_owned().await
    }

    async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyLocks::new());
        let guard = locks.lock("pilots:ace").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock("pilots:ace").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_released_keys_are_pruned() {
        let locks = KeyLocks::new();
        for n in 0..5 {
            let _guard = locks.lock(&format!("pilots:user{n}")).await;
        }

        let held = locks.lock("pilots:ace").await;
        let _other = locks.lock("prices:ace:codm").await;
        assert_eq!(locks.tracked().await, 2);

        drop(held);
        let _again = locks.lock("pilots:bee").await;
        assert_eq!(locks.tracked().await, 2);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyLocks::new();
        let _first = locks.lock("pilots:ace").await;
        let _second = locks.lock("pilots:bee").await;
    }
}
