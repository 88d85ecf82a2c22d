// src/session.rs

use crate::constants::SESSION_ID_KEY;
use crate::storage::KeyValueStore;
use chrono::Utc;
use log::{debug, warn};
use rand::Rng;
use std::sync::{Arc, Mutex, PoisonError};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_LEN: usize = 8;

/// Hands out the identifier the backend uses to correlate turns of one
/// session. The id lives in session storage; a memory copy covers stores
/// that refuse writes.
pub struct SessionIdentity {
    store: Arc<dyn KeyValueStore>,
    fallback: Mutex<Option<String>>,
}

impl SessionIdentity {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            fallback: Mutex::new(None),
        }
    }

    pub fn get_or_create(&self) -> String {
        match self.store.get(SESSION_ID_KEY) {
            Ok(Some(id)) if !id.is_empty() => return id,
            Ok(_) => {}
            Err(e) => warn!("Failed to read session id: {}", e),
        }

        let mut fallback = self.fallback.lock().unwrap_or_else(PoisonError::into_inner);
        let id = fallback.clone().unwrap_or_else(generate_session_id);
        match self.store.set(SESSION_ID_KEY, &id) {
            Ok(()) => debug!("Created session id {}", id),
            Err(e) => warn!("Failed to store session id: {}", e),
        }
        *fallback = Some(id.clone());
        id
    }

    /// Forgets the current id; the next call to `get_or_create` mints a new one.
    pub fn reset(&self) {
        *self.fallback.lock().unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(e) = self.store.remove(SESSION_ID_KEY) {
            warn!("Failed to remove session id: {}", e);
        }
    }
}

/// `session_<unix millis>_<8 base-36 chars>`
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_RANDOM_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
}
