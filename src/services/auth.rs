use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::config::{AccountSettings, Game};
use crate::domain::validation::{check_new_password, require_credentials};
use crate::domain::AuthContext;
use crate::errors::TrackerError;
use crate::storage::keys::user_key;
use crate::storage::{KeyLocks, KeyValueStore};
use crate::stores::{accounts, prices, session};

/// Where the user should land after an account action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    ChooseGame,
    SetPrices(Game),
    Dashboard(Game),
    Home,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignIn {
    pub context: AuthContext,
    pub destination: Destination,
}

pub struct AuthService<S> {
    store: Arc<S>,
    settings: AccountSettings,
    locks: KeyLocks,
}

impl<S: KeyValueStore> AuthService<S> {
    pub fn new(store: Arc<S>, settings: AccountSettings) -> Self {
        Self {
            store,
            settings,
            locks: KeyLocks::new(),
        }
    }

    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<AuthContext> {
        if username.is_empty() || password.is_empty() || confirmation.is_empty() {
            return Err(TrackerError::MissingFields("Please fill all fields".to_string()).into());
        }
        check_new_password(password, confirmation, self.settings.min_password_length)?;

        let _guard = self.locks.lock(&user_key(username)).await;
        let account = accounts::create_account(self.store.as_ref(), username, password).await?;
        session::set_session(self.store.as_ref(), &account.username).await?;

        Ok(AuthContext::new(account.username))
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignIn> {
        require_credentials(username, password)?;

        let context = accounts::authenticate(self.store.as_ref(), username, password).await?;
        session::set_session(self.store.as_ref(), &context.username).await?;
        info!("Signed in {}", context.username);

        let destination = self.landing_for(&context).await?;
        Ok(SignIn {
            context,
            destination,
        })
    }

    async fn landing_for(&self, context: &AuthContext) -> Result<Destination> {
        let codm = Game::CallOfDutyMobile;
        if prices::has_prices(self.store.as_ref(), &context.username, codm).await? {
            return Ok(Destination::Dashboard(codm));
        }

        match session::get_game(self.store.as_ref()).await? {
            Some(game) if game == codm => Ok(Destination::SetPrices(codm)),
            _ => Ok(Destination::ChooseGame),
        }
    }

    pub async fn sign_out(&self) -> Result<()> {
        session::clear_session(self.store.as_ref()).await
    }

    /// The signed-in user, or `NoSession`
    pub async fn current(&self) -> Result<AuthContext> {
        session::get_session(self.store.as_ref())
            .await?
            .ok_or_else(|| TrackerError::NoSession.into())
    }

    pub async fn choose_game(&self, context: &AuthContext, game: Game) -> Result<Destination> {
        session::set_game(self.store.as_ref(), game).await?;
        info!("{} chose {}", context.username, game);

        if game.has_ladder() {
            Ok(Destination::SetPrices(game))
        } else {
            Ok(Destination::Home)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceTable;
    use crate::storage::MemoryStore;

    fn service() -> (Arc<MemoryStore>, AuthService<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(Arc::clone(&store), AccountSettings::default());
        (store, service)
    }

    fn tracker_error(err: &anyhow::Error) -> TrackerError {
        err.downcast_ref::<TrackerError>().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_starts_a_session() {
        let (_store, auth) = service();
        let ctx = auth.sign_up("ace", "secret1", "secret1").await.unwrap();

        assert_eq!(ctx.username, "ace");
        assert_eq!(auth.current().await.unwrap(), ctx);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let (_store, auth) = service();

        let err = auth.sign_up("ace", "", "").await.unwrap_err();
        assert_eq!(
            tracker_error(&err),
            TrackerError::MissingFields("Please fill all fields".into())
        );

        let err = auth.sign_up("ace", "secret1", "secret2").await.unwrap_err();
        assert_eq!(tracker_error(&err), TrackerError::PasswordMismatch);

        let err = auth.sign_up("ace", "abc", "abc").await.unwrap_err();
        assert_eq!(tracker_error(&err), TrackerError::WeakPassword(6));

        assert!(matches!(
            tracker_error(&auth.current().await.unwrap_err()),
            TrackerError::NoSession
        ));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_username() {
        let (_store, auth) = service();
        auth.sign_up("ace", "secret1", "secret1").await.unwrap();

        let err = auth.sign_up("ace", "other12", "other12").await.unwrap_err();
        assert_eq!(tracker_error(&err), TrackerError::UsernameTaken("ace".into()));
    }

    #[tokio::test]
    async fn test_sign_in_routes_to_choose_game_first() {
        let (_store, auth) = service();
        auth.sign_up("ace", "secret1", "secret1").await.unwrap();
        auth.sign_out().await.unwrap();

        let signed_in = auth.sign_in("ace", "secret1").await.unwrap();
        assert_eq!(signed_in.destination, Destination::ChooseGame);
    }

    #[tokio::test]
    async fn test_sign_in_routes_by_game_then_prices() {
        let (store, auth) = service();
        let ctx = auth.sign_up("ace", "secret1", "secret1").await.unwrap();

        let next = auth.choose_game(&ctx, Game::CallOfDutyMobile).await.unwrap();
        assert_eq!(next, Destination::SetPrices(Game::CallOfDutyMobile));
        let signed_in = auth.sign_in("ace", "secret1").await.unwrap();
        assert_eq!(signed_in.destination, Destination::SetPrices(Game::CallOfDutyMobile));

        let table = PriceTable::from_pairs([("Rookie-I", 1.0)]);
        prices::save_prices(store.as_ref(), "ace", Game::CallOfDutyMobile, &table)
            .await
            .unwrap();
        let signed_in = auth.sign_in("ace", "secret1").await.unwrap();
        assert_eq!(signed_in.destination, Destination::Dashboard(Game::CallOfDutyMobile));
    }

    #[tokio::test]
    async fn test_placeholder_game_goes_home() {
        let (_store, auth) = service();
        let ctx = auth.sign_up("ace", "secret1", "secret1").await.unwrap();

        let next = auth.choose_game(&ctx, Game::MobileLegends).await.unwrap();
        assert_eq!(next, Destination::Home);
    }

    #[tokio::test]
    async fn test_sign_in_failures_leave_session_untouched() {
        let (_store, auth) = service();
        auth.sign_up("ace", "secret1", "secret1").await.unwrap();

        let err = auth.sign_in("ace", "nope").await.unwrap_err();
        assert_eq!(tracker_error(&err), TrackerError::WrongPassword);
        let err = auth.sign_in("bee", "secret1").await.unwrap_err();
        assert_eq!(tracker_error(&err), TrackerError::NotFound("bee".into()));
        let err = auth.sign_in("", "").await.unwrap_err();
        assert!(matches!(tracker_error(&err), TrackerError::MissingFields(_)));

        assert_eq!(auth.current().await.unwrap().username, "ace");
    }
}
