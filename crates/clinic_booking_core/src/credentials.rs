//! crates/clinic_booking_core/src/credentials.rs
//!
//! Registered accounts and the single persisted session.

use crate::domain::{Account, Registration};
use crate::ports::{PortError, StorageService};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Account already exists with this email: {0}")]
    DuplicateEmail(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Holds the current session and delegates account persistence to storage.
pub struct CredentialStore {
    storage: Arc<dyn StorageService>,
    session: Option<Account>,
}

impl CredentialStore {
    /// Creates the store, restoring whatever session was persisted last.
    pub async fn restore(storage: Arc<dyn StorageService>) -> AuthResult<Self> {
        let session = storage.load_session().await?;
        if let Some(account) = &session {
            info!("Restored session for {}", account.email);
        }
        Ok(Self { storage, session })
    }

    pub fn current_session(&self) -> Option<&Account> {
        self.session.as_ref()
    }

    /// Creates an account and signs it in. Emails are unique and case-sensitive.
    pub async fn register(&mut self, registration: Registration) -> AuthResult<Account> {
        let account = Account {
            first_name: registration.first_name.trim().to_string(),
            last_name: registration.last_name.trim().to_string(),
            email: registration.email.trim().to_string(),
            password: registration.password.trim().to_string(),
        };

        self.storage
            .insert_account(&account)
            .await
            .map_err(|e| match e {
                PortError::AlreadyExists(_) => AuthError::DuplicateEmail(account.email.clone()),
                other => AuthError::Storage(other),
            })?;
        info!("Registered account {}", account.email);

        self.start_session(account).await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AuthResult<Account> {
        let account = match self.storage.get_account_by_email(email.trim()).await {
            Ok(account) => account,
            Err(PortError::NotFound(_)) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };
        if account.password != password.trim() {
            return Err(AuthError::InvalidCredentials);
        }
        info!("Logged in {}", account.email);

        self.start_session(account).await
    }

    pub async fn logout(&mut self) -> AuthResult<()> {
        self.storage.clear_session().await?;
        if let Some(account) = self.session.take() {
            info!("Logged out {}", account.email);
        }
        Ok(())
    }

    async fn start_session(&mut self, account: Account) -> AuthResult<Account> {
        self.storage.save_session(&account).await?;
        self.session = Some(account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStorage;

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    async fn fresh_store() -> (Arc<FakeStorage>, CredentialStore) {
        let storage = Arc::new(FakeStorage::default());
        let store = CredentialStore::restore(storage.clone()).await.unwrap();
        (storage, store)
    }

    #[tokio::test]
    async fn register_signs_the_account_in() {
        let (storage, mut store) = fresh_store().await;
        let account = store
            .register(registration("john@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(store.current_session(), Some(&account));
        assert_eq!(storage.stored_session(), Some(account));
    }

    #[tokio::test]
    async fn duplicate_email_keeps_the_first_session() {
        let (_storage, mut store) = fresh_store().await;
        let first = store
            .register(registration("john@example.com", "secret"))
            .await
            .unwrap();

        let mut second = registration("john@example.com", "other");
        second.first_name = "Johnny".into();
        let err = store.register(second).await.unwrap_err();

        assert!(matches!(err, AuthError::DuplicateEmail(email) if email == "john@example.com"));
        assert_eq!(store.current_session(), Some(&first));
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_sensitive() {
        let (_storage, mut store) = fresh_store().await;
        store.register(registration("john@example.com", "a")).await.unwrap();
        assert!(store.register(registration("John@example.com", "b")).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_leaves_session_unchanged() {
        let (_storage, mut store) = fresh_store().await;
        store.register(registration("john@example.com", "secret")).await.unwrap();
        store.logout().await.unwrap();

        let err = store.login("john@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(store.current_session().is_none());
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let (_storage, mut store) = fresh_store().await;
        let err = store.login("ghost@example.com", "x").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_trims_inputs_like_the_form() {
        let (_storage, mut store) = fresh_store().await;
        store.register(registration(" john@example.com ", " secret ")).await.unwrap();
        store.logout().await.unwrap();

        let account = store.login("john@example.com", "secret ").await.unwrap();
        assert_eq!(account.email, "john@example.com");
    }

    #[tokio::test]
    async fn session_is_restored_from_storage() {
        let (storage, mut store) = fresh_store().await;
        let account = store.register(registration("john@example.com", "s")).await.unwrap();

        let restored = CredentialStore::restore(storage.clone()).await.unwrap();
        assert_eq!(restored.current_session(), Some(&account));

        store.logout().await.unwrap();
        let restored = CredentialStore::restore(storage).await.unwrap();
        assert!(restored.current_session().is_none());
    }
}
