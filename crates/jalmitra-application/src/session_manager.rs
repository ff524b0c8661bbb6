//! Session container.

use jalmitra_core::error::{JalmitraError, Result};
use jalmitra_core::session::{SESSION_STORAGE_KEY, Session};
use jalmitra_core::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Owns the sign-in state and keeps it durable across reloads.
///
/// Every mutation is written through to the store before the in-memory
/// session changes, so a reload right after `login`/`logout` sees the same
/// state and a failed write leaves memory untouched.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
    /// Serializes write-throughs so memory and storage commit in the same order.
    writer: Mutex<()>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(Session::inactive());
        Self {
            store,
            state,
            writer: Mutex::new(()),
        }
    }

    /// Restores a previously stored user id.
    ///
    /// Never fails: an empty store is the normal signed-out state, and an
    /// unreadable one is logged and treated the same way.
    pub async fn restore(&self) -> Session {
        let stored = match self.store.get(SESSION_STORAGE_KEY).await {
            Ok(stored) => stored.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session, starting signed out");
                None
            }
        };

        let session = match stored {
            Some(user_id) => {
                tracing::info!(%user_id, "restored session");
                Session::active(user_id)
            }
            None => {
                tracing::debug!("no stored session");
                Session::inactive()
            }
        };

        self.state.send_replace(session.clone());
        session
    }

    /// Records a successful sign-in for `user_id`.
    ///
    /// Credentials are not checked here; see `Authenticator`. The id is
    /// stored exactly as given.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Farmer id returned by the authenticator
    ///
    /// # Returns
    ///
    /// `InvalidSession` for a blank id, `StorageWriteFailed` if the id could
    /// not be persisted. The session is unchanged on error.
    pub async fn login(&self, user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(JalmitraError::InvalidSession("user id must not be empty".to_string()));
        }

        let _guard = self.writer.lock().await;
        self.store.set(SESSION_STORAGE_KEY, user_id).await?;
        self.state.send_replace(Session::active(user_id));

        tracing::info!(%user_id, "logged in");
        Ok(())
    }

    /// Clears the session here and in storage. Calling it while signed out is a no-op.
    ///
    /// # Returns
    ///
    /// `StorageWriteFailed` if the stored id could not be removed; the
    /// session then stays active.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.store.remove(SESSION_STORAGE_KEY).await?;
        let was_active = self.state.send_if_modified(|session| {
            let active = session.is_active();
            *session = Session::inactive();
            active
        });

        if was_active {
            tracing::info!("logged out");
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().is_active()
    }

    /// Notified after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}
