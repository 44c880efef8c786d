use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::config::Game;
use crate::domain::{AuthContext, PriceTable};
use crate::errors::TrackerError;
use crate::ladder::{build_ladder, resolve_range_in, ChargedRange, Ladder, Step};
use crate::storage::keys::prices_key;
use crate::storage::{KeyLocks, KeyValueStore};
use crate::stores::prices;

/// One line of a quote: the step and its configured price, if any
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub step: Step,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub range: ChargedRange,
    pub lines: Vec<QuoteLine>,
    pub total: f64,
}

pub struct PricingService<S> {
    store: Arc<S>,
    ladder: Ladder,
    locks: KeyLocks,
}

impl<S: KeyValueStore> PricingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            ladder: build_ladder(),
            locks: KeyLocks::new(),
        }
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub async fn prices(&self, context: &AuthContext, game: Game) -> Result<PriceTable> {
        let game = game.require_ladder()?;
        prices::load_prices(self.store.as_ref(), &context.username, game).await
    }

    /// Every priceable step in ladder order with its current price
    pub async fn price_sheet(&self, context: &AuthContext, game: Game) -> Result<Vec<QuoteLine>> {
        let table = self.prices(context, game).await?;
        Ok(self.lines_for(self.ladder.priceable().copied(), &table))
    }

    /// Overlay `key=value` text inputs on the saved table and save the result.
    ///
    /// An input that is not a number removes that step's price.
    pub async fn update(
        &self,
        context: &AuthContext,
        game: Game,
        inputs: &[(String, String)],
    ) -> Result<PriceTable> {
        self.check_input_keys(inputs)?;
        let game = game.require_ladder()?;

        let _guard = self.locks.lock(&prices_key(&context.username, game)).await;
        let mut merged = self.prices(context, game).await?.to_inputs();
        for (key, text) in inputs {
            merged.insert(key.clone(), text.clone());
        }

        let table = PriceTable::from_inputs(merged);
        prices::save_prices(self.store.as_ref(), &context.username, game, &table).await?;
        info!("{} saved {} prices for {}", context.username, table.len(), game);
        Ok(table)
    }

    fn check_input_keys(&self, inputs: &[(String, String)]) -> Result<(), TrackerError> {
        for (key, _) in inputs {
            let priceable = Step::from_key(key).is_some_and(|step| !step.is_peak());
            if !priceable {
                return Err(TrackerError::invalid(format!(
                    "'{key}' is not a rank tier (e.g. \"Master-I\")"
                )));
            }
        }
        Ok(())
    }

    pub async fn quote(
        &self,
        context: &AuthContext,
        game: Game,
        start: &str,
        end: &str,
    ) -> Result<Quote> {
        let table = self.prices(context, game).await?;
        let range = resolve_range_in(&self.ladder, start, end)?;
        Ok(self.quote_with(range, &table))
    }

    pub fn quote_with(&self, range: ChargedRange, table: &PriceTable) -> Quote {
        let lines = self.lines_for(range.steps().iter().copied(), table);
        let total = range.total(table);
        Quote {
            range,
            lines,
            total,
        }
    }

    fn lines_for(&self, steps: impl Iterator<Item = Step>, table: &PriceTable) -> Vec<QuoteLine> {
        steps
            .map(|step| QuoteLine {
                step,
                price: table.price_of(&step),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const CODM: Game = Game::CallOfDutyMobile;

    fn service() -> PricingService<MemoryStore> {
        PricingService::new(Arc::new(MemoryStore::new()))
    }

    fn inputs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_update_merges_and_removes() {
        let pricing = service();
        let ctx = AuthContext::new("ace");

        pricing
            .update(&ctx, CODM, &inputs(&[("Master-I", "10"), ("Master-II", "15")]))
            .await
            .unwrap();
        let table = pricing
            .update(&ctx, CODM, &inputs(&[("Master-II", ""), ("Master-III", "7.5")]))
            .await
            .unwrap();

        assert_eq!(
            table,
            PriceTable::from_pairs([("Master-I", 10.0), ("Master-III", 7.5)])
        );
        assert_eq!(pricing.prices(&ctx, CODM).await.unwrap(), table);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let pricing = Arc::new(service());
        let ctx = AuthContext::new("ace");
        let keys: Vec<String> = pricing.ladder().priceable().map(Step::key).collect();

        let handles: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(n, key)| {
                let pricing = Arc::clone(&pricing);
                let ctx = ctx.clone();
                let entry = inputs(&[(key.as_str(), n.to_string().as_str())]);
                tokio::spawn(async move { pricing.update(&ctx, CODM, &entry).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let table = pricing.prices(&ctx, CODM).await.unwrap();
        assert_eq!(table.len(), keys.len());
        assert_eq!(table.get("Rookie-II"), Some(1.0));
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_keys() {
        let pricing = service();
        let ctx = AuthContext::new("ace");

        for key in ["Legendary-I", "Legendary", "Mastr-I"] {
            let err = pricing
                .update(&ctx, CODM, &inputs(&[(key, "5")]))
                .await
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TrackerError>(),
                Some(TrackerError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_quote_lists_prices_and_total() {
        let pricing = service();
        let ctx = AuthContext::new("ace");
        pricing
            .update(&ctx, CODM, &inputs(&[("Master-I", "10"), ("Master-II", "15")]))
            .await
            .unwrap();

        let quote = pricing
            .quote(&ctx, CODM, "Master IV", "Master I")
            .await
            .unwrap();

        assert_eq!(quote.range.keys(), vec!["Master-I", "Master-II", "Master-III"]);
        assert_eq!(quote.lines[2].price, None);
        assert_eq!(quote.total, 25.0);
    }

    #[tokio::test]
    async fn test_placeholder_game_has_no_prices() {
        let pricing = service();
        let err = pricing
            .prices(&AuthContext::new("ace"), Game::MobileLegends)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::UnsupportedGame(_))
        ));
    }

    #[tokio::test]
    async fn test_price_sheet_covers_every_tier() {
        let pricing = service();
        let sheet = pricing
            .price_sheet(&AuthContext::new("ace"), CODM)
            .await
            .unwrap();
        assert_eq!(sheet.len(), 30);
        assert!(sheet.iter().all(|line| line.price.is_none()));
    }
}
