//! Device-wide pointers to the signed-in user and the chosen game.
//!
//! Both are stored as raw strings, not JSON.

use anyhow::Result;
use log::warn;

use crate::config::Game;
use crate::domain::AuthContext;
use crate::storage::keys::{SESSION_GAME, SESSION_USER};
use crate::storage::KeyValueStore;

pub async fn set_session<S: KeyValueStore>(store: &S, username: &str) -> Result<()> {
    store.set(SESSION_USER, username).await
}

pub async fn get_session<S: KeyValueStore>(store: &S) -> Result<Option<AuthContext>> {
    let username = store.get(SESSION_USER).await?;
    Ok(username
        .filter(|name| !name.is_empty())
        .map(AuthContext::new))
}

pub async fn clear_session<S: KeyValueStore>(store: &S) -> Result<()> {
    store.remove(SESSION_USER).await
}

pub async fn set_game<S: KeyValueStore>(store: &S, game: Game) -> Result<()> {
    store.set(SESSION_GAME, game.display_name()).await
}

pub async fn get_game<S: KeyValueStore>(store: &S) -> Result<Option<Game>> {
    let Some(name) = store.get(SESSION_GAME).await? else {
        return Ok(None);
    };

    let game = Game::from_display_name(&name);
    if game.is_none() {
        warn!("Ignoring unknown stored game: {name}");
    }
    Ok(game)
}
