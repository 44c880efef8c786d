use anyhow::Result;
use log::info;

use crate::domain::{Account, AuthContext};
use crate::errors::TrackerError;
use crate::storage::keys::user_key;
use crate::storage::{load_json, save_json, KeyValueStore};

pub async fn find_account<S: KeyValueStore>(store: &S, username: &str) -> Result<Option<Account>> {
    load_json(store, &user_key(username)).await
}

/// Fails with `UsernameTaken` if the exact username is already stored;
/// the existing account is never overwritten.
pub async fn create_account<S: KeyValueStore>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<Account> {
    if find_account(store, username).await?.is_some() {
        return Err(TrackerError::UsernameTaken(username.to_string()).into());
    }

    let account = Account {
        username: username.to_string(),
        password: password.to_string(),
    };
    save_json(store, &user_key(username), &account).await?;

    info!("Created account {}", username);
    Ok(account)
}

pub async fn authenticate<S: KeyValueStore>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<AuthContext> {
    let account = find_account(store, username)
        .await?
        .ok_or_else(|| TrackerError::NotFound(username.to_string()))?;

    if account.password != password {
        return Err(TrackerError::WrongPassword.into());
    }

    Ok(AuthContext::new(account.username))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn tracker_error(err: &anyhow::Error) -> Option<&TrackerError> {
        err.downcast_ref::<TrackerError>()
    }

    #[tokio::test]
    async fn test_create_then_authenticate() {
        let store = MemoryStore::new();
        create_account(&store, "ace", "hunter22").await.unwrap();

        let ctx = authenticate(&store, "ace", "hunter22").await.unwrap();
        assert_eq!(ctx, AuthContext::new("ace"));
    }

    #[tokio::test]
    async fn test_duplicate_username_keeps_first_password() {
        let store = MemoryStore::new();
        create_account(&store, "ace", "first-pass").await.unwrap();

        let err = create_account(&store, "ace", "second-pass").await.unwrap_err();
        assert_eq!(
            tracker_error(&err),
            Some(&TrackerError::UsernameTaken("ace".into()))
        );

        let stored = find_account(&store, "ace").await.unwrap().unwrap();
        assert_eq!(stored.password, "first-pass");
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let store = MemoryStore::new();
        create_account(&store, "ace", "secret1").await.unwrap();
        assert!(create_account(&store, "Ace", "secret2").await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_failures() {
        let store = MemoryStore::new();
        create_account(&store, "ace", "secret1").await.unwrap();

        let err = authenticate(&store, "bee", "secret1").await.unwrap_err();
        assert_eq!(tracker_error(&err), Some(&TrackerError::NotFound("bee".into())));

        let err = authenticate(&store, "ace", "wrong").await.unwrap_err();
        assert_eq!(tracker_error(&err), Some(&TrackerError::WrongPassword));
    }

    #[tokio::test]
    async fn test_account_wire_shape() {
        let store = MemoryStore::new();
        create_account(&store, "ace", "secret1").await.unwrap();

        let raw = store.get("user:ace").await.unwrap().unwrap();
        assert_eq!(raw, r#"{"username":"ace","password":"secret1"}"#);
    }
}
