use std::sync::Arc;

use primer_core::{Signal, signal};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{KeyValueStore, decode, encode};

/// A value mirrored into a [`KeyValueStore`] under a fixed key.
///
/// Storage and codec failures never reach the caller: a failed initial read
/// falls back to the default, and a failed write still updates the in-memory
/// value. Both are logged.
pub struct Persisted<T: 'static> {
    key: String,
    store: Arc<dyn KeyValueStore>,
    value: Signal<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let initial = match store.read(&key) {
            Ok(Some(text)) => match decode(&key, &text) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("persisted: {e}; using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                log::warn!("persisted: {e}; using default");
                default
            }
        };
        Self {
            key,
            store,
            value: signal(initial),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn set(&self, value: T) {
        self.write_through(&value);
        self.value.set(value);
    }

    /// Computes the next value from the previous one, then stores it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.value.with(f);
        self.set(next);
    }

    pub fn signal(&self) -> Signal<T> {
        self.value.clone()
    }

    fn write_through(&self, value: &T) {
        let written = encode(&self.key, value).and_then(|text| self.store.write(&self.key, &text));
        if let Err(e) = written {
            log::warn!("persisted: {e}; keeping in-memory value only");
        }
    }
}
