//! In-memory message library with write-through persistence

use crate::domain::message::AudioMessage;

use super::ports::{LibraryStore, StoreError};

/// The collection of audio messages, hydrated once at startup and mirrored
/// back to its store on every mutation.
///
/// Callers own an instance (there is no global); the store write completes
/// before any mutation returns, so later reads within the process always
/// observe the persisted state.
pub struct MessageLibrary<S: LibraryStore> {
    store: S,
    messages: Vec<AudioMessage>,
}

impl<S: LibraryStore> MessageLibrary<S> {
    /// Load the library from its store.
    ///
    /// Fails soft: unreadable or corrupt persisted data yields an empty
    /// library with a warning, never an error. The app must stay usable
    /// even when the library file is damaged.
    pub async fn hydrate(store: S) -> Self {
        let messages = match store.load().await {
            Ok(messages) => messages,
            Err(e) => {
                eprintln!("Warning: could not load message library: {}", e);
                Vec::new()
            }
        };
        Self { store, messages }
    }

    /// All messages, newest first
    pub fn messages(&self) -> &[AudioMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Look up a message by identifier.
    ///
    /// `None` is a normal outcome (a code from another device or a deleted
    /// message), not a fault.
    pub fn resolve(&self, id: &str) -> Option<&AudioMessage> {
        self.messages.iter().find(|m| m.id.as_str() == id)
    }

    /// Insert a new message at the front, or replace the record with the
    /// same id in place.
    ///
    /// Replacement keeps the record's position and its original creation
    /// time; only the identifier of an existing record is matched, never
    /// its content. Persists the full collection before returning.
    pub async fn upsert(&mut self, mut message: AudioMessage) -> Result<(), StoreError> {
        match self.messages.iter().position(|m| m.id == message.id) {
            Some(pos) => {
                message.created_at = self.messages[pos].created_at;
                self.messages[pos] = message;
            }
            None => self.messages.insert(0, message),
        }
        self.store.save(&self.messages).await
    }

    /// Remove a message by identifier, if present.
    ///
    /// Removal is unconditional once invoked; any confirmation happens at
    /// the caller. Absent ids are a no-op, not an error. Persists the
    /// resulting collection before returning.
    pub async fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.messages.len();
        self.messages.retain(|m| m.id.as_str() != id);
        let removed = self.messages.len() != before;
        self.store.save(&self.messages).await?;
        Ok(removed)
    }
}
