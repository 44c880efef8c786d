use anyhow::Result;
use log::debug;

use crate::config::Game;
use crate::domain::PriceTable;
use crate::storage::keys::prices_key;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Missing table loads as empty. Legacy `Legendary-*` keys are dropped while decoding.
pub async fn load_prices<S: KeyValueStore>(
    store: &S,
    username: &str,
    game: Game,
) -> Result<PriceTable> {
    let table: PriceTable = load_json(store, &prices_key(username, game))
        .await?
        .unwrap_or_default();
    Ok(table)
}

pub async fn has_prices<S: KeyValueStore>(store: &S, username: &str, game: Game) -> Result<bool> {
    Ok(store.get(&prices_key(username, game)).await?.is_some())
}

pub async fn save_prices<S: KeyValueStore>(
    store: &S,
    username: &str,
    game: Game,
    table: &PriceTable,
) -> Result<()> {
    let key = prices_key(username, game);
    save_json(store, &key, table).await?;
    debug!("Saved {} prices to {}", table.len(), key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const CODM: Game = Game::CallOfDutyMobile;

    #[tokio::test]
    async fn test_missing_table_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_prices(&store, "ace", CODM).await.unwrap().is_empty());
        assert!(!has_prices(&store, "ace", CODM).await.unwrap());
    }

    #[tokio::test]
    async fn test_round_trip_drops_only_legacy_keys() {
        let store = MemoryStore::new();
        store
            .set(
                "prices:ace:codm",
                r#"{"Master-I":10,"Master-II":15.5,"Legendary-III":80}"#,
            )
            .await
            .unwrap();

        let loaded = load_prices(&store, "ace", CODM).await.unwrap();
        save_prices(&store, "ace", CODM, &loaded).await.unwrap();
        let reloaded = load_prices(&store, "ace", CODM).await.unwrap();

        assert_eq!(
            reloaded,
            PriceTable::from_pairs([("Master-I", 10.0), ("Master-II", 15.5)])
        );
        assert_eq!(reloaded, loaded);
    }

    #[tokio::test]
    async fn test_tables_are_scoped_per_user() {
        let store = MemoryStore::new();
        let table = PriceTable::from_pairs([("Pro-I", 2.0)]);
        save_prices(&store, "ace", CODM, &table).await.unwrap();

        assert!(has_prices(&store, "ace", CODM).await.unwrap());
        assert!(load_prices(&store, "bee", CODM).await.unwrap().is_empty());
    }
}
