//! Session lifecycle on top of a snapshot store
//!
//! The manager keeps the session for the currently open game and writes a
//! snapshot after every change, so a crash at any point loses at most the
//! operation in flight.

use super::store::{SnapshotStore, StoreError};
use crate::core::GameKey;
use crate::game::GameSession;

/// Load the stored session for `key`, or a fresh one if none is stored
///
/// Unreadable snapshots are discarded by [`GameSession::restore`].
///
/// # Errors
///
/// Returns `StoreError` only when the store itself fails.
pub fn load_session<S: SnapshotStore + ?Sized>(
    store: &S,
    key: &GameKey,
) -> Result<GameSession, StoreError> {
    let session = match store.read(&key.storage_key())? {
        Some(raw) => GameSession::restore(key.clone(), &raw),
        None => GameSession::new(key.clone()),
    };
    Ok(session)
}

/// Save `session` under its own storage key
///
/// # Errors
///
/// Returns `StoreError` if encoding or the store fails.
pub fn save_session<S: SnapshotStore + ?Sized>(
    store: &mut S,
    session: &GameSession,
) -> Result<(), StoreError> {
    let json = session.snapshot().to_json()?;
    store.write(&session.key().storage_key(), &json)
}

/// Owns the open session and persists it after each mutation
#[derive(Debug)]
pub struct SessionManager<S> {
    store: S,
    session: GameSession,
}

impl<S: SnapshotStore> SessionManager<S> {
    /// Open `key`, restoring its saved state if any
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn open(store: S, key: GameKey) -> Result<Self, StoreError> {
        let session = load_session(&store, &key)?;
        tracing::info!(%key, guesses = session.guesses().len(), "game opened");
        Ok(Self { store, session })
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply `f` to the session, then persist the result
    ///
    /// The snapshot is written even when `f` reports a rejection, since the
    /// session is unchanged in that case and the write is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be written.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut GameSession) -> T) -> Result<T, StoreError> {
        let value = f(&mut self.session);
        self.save()?;
        Ok(value)
    }

    /// Persist the current session
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be written.
    pub fn save(&mut self) -> Result<(), StoreError> {
        save_session(&mut self.store, &self.session)
    }

    /// Save the open game and switch to `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if saving or loading fails; the previous game
    /// stays open when loading fails.
    pub fn switch_to(&mut self, key: GameKey) -> Result<(), StoreError> {
        self.save()?;
        let next = load_session(&self.store, &key)?;
        tracing::info!(from = %self.session.key(), to = %key, "switched game");
        self.session = next;
        Ok(())
    }

    /// Throw away the saved state of the open game and start over
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored snapshot cannot be removed.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let key = self.session.key().clone();
        self.store.remove(&key.storage_key())?;
        tracing::info!(%key, "game reset");
        self.session = GameSession::new(key);
        Ok(())
    }
}
