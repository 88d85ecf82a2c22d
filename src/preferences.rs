// src/preferences.rs

use crate::constants::{DEFAULT_LANGUAGE, PREFERRED_LANGUAGE_KEY, PREFERRED_MODEL_KEY};
use crate::models::Preferences;
use crate::storage::KeyValueStore;
use log::{info, warn};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Language,
    Model,
}

impl PreferenceKey {
    pub fn storage_key(self) -> &'static str {
        match self {
            PreferenceKey::Language => PREFERRED_LANGUAGE_KEY,
            PreferenceKey::Model => PREFERRED_MODEL_KEY,
        }
    }
}

/// Long-lived user choices. Values are cached at construction and written
/// through on every change.
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
    current: Mutex<Preferences>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_default_language(store, DEFAULT_LANGUAGE)
    }

    pub fn with_default_language(store: Arc<dyn KeyValueStore>, default_language: &str) -> Self {
        let language = read(&*store, PreferenceKey::Language)
            .unwrap_or_else(|| default_language.to_string());
        let model = read(&*store, PreferenceKey::Model);
        Self {
            store,
            current: Mutex::new(Preferences { language, model }),
        }
    }

    /// Returns the stored value, or the default: the default language for
    /// `Language` and an empty string (backend default) for `Model`.
    pub fn get(&self, key: PreferenceKey) -> String {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match key {
            PreferenceKey::Language => current.language.clone(),
            PreferenceKey::Model => current.model.clone().unwrap_or_default(),
        }
    }

    pub fn set(&self, key: PreferenceKey, value: &str) {
        let value = value.trim();
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            match key {
                PreferenceKey::Language => current.language = value.to_string(),
                PreferenceKey::Model => {
                    current.model = (!value.is_empty()).then(|| value.to_string())
                }
            }
        }
        match self.store.set(key.storage_key(), value) {
            Ok(()) => info!("Preference {} set to {:?}", key.storage_key(), value),
            Err(e) => warn!("Failed to persist preference {}: {}", key.storage_key(), e),
        }
    }

    pub fn language(&self) -> String {
        self.get(PreferenceKey::Language)
    }

    pub fn model(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .model
            .clone()
    }

    pub fn preferences(&self) -> Preferences {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn read(store: &dyn KeyValueStore, key: PreferenceKey) -> Option<String> {
    match store.get(key.storage_key()) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!("Failed to read preference {}: {}", key.storage_key(), e);
            None
        }
    }
}
