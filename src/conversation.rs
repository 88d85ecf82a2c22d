// src/conversation.rs

use crate::constants::CHAT_HISTORY_KEY;
use crate::models::{Message, Sender};
use crate::storage::KeyValueStore;
use crate::ui::Renderer;
use log::{debug, warn};
use std::sync::{Arc, Mutex, PoisonError};

/// The transcript for the current session, mirrored to session storage.
pub struct Conversation {
    messages: Mutex<Vec<Message>>,
    store: Arc<dyn KeyValueStore>,
    renderer: Arc<dyn Renderer>,
}

impl Conversation {
    pub fn new(store: Arc<dyn KeyValueStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            store,
            renderer,
        }
    }

    /// Appends a message, persists the whole transcript and draws the entry.
    ///
    /// The store write is synchronous and runs while the transcript lock is
    /// held, so it blocks the calling task for one small local write. Stored
    /// history always matches append order.
    pub fn append(&self, sender: Sender, text: impl Into<String>) {
        let message = Message::new(sender, text);
        debug!("Appending {} message", sender);
        {
            let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
            messages.push(message.clone());
            self.save(&messages);
        }
        self.renderer.draw_message(&message);
    }

    /// Loads the persisted transcript and replays it into the renderer.
    /// Missing or corrupt history leaves the transcript empty.
    pub fn restore(&self) -> usize {
        let stored = match self.store.get(CHAT_HISTORY_KEY) {
            Ok(Some(json_str)) => json_str,
            Ok(None) => {
                debug!("No existing conversation history found.");
                return 0;
            }
            Err(e) => {
                warn!("Failed to read conversation history: {}", e);
                return 0;
            }
        };

        let history: Vec<Message> = match serde_json::from_str(&stored) {
            Ok(history) => history,
            Err(e) => {
                warn!("Discarding malformed conversation history: {}", e);
                return 0;
            }
        };

        for message in &history {
            self.renderer.draw_message(message);
        }
        let count = history.len();
        *self.messages.lock().unwrap_or_else(PoisonError::into_inner) = history;
        debug!("Restored {} messages.", count);
        count
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the transcript and its persisted copy.
    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        if let Err(e) = self.store.remove(CHAT_HISTORY_KEY) {
            warn!("Failed to remove conversation history: {}", e);
        }
    }

    fn save(&self, messages: &[Message]) {
        let json_str = match serde_json::to_string(messages) {
            Ok(json_str) => json_str,
            Err(e) => {
                warn!("Failed to serialize conversation history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(CHAT_HISTORY_KEY, &json_str) {
            warn!("Failed to save conversation history: {}", e);
        }
    }
}
