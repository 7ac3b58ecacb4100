// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port.
//!
//! A [`ConfigStore`] moves raw bytes under a logical key; a [`ConfigService`]
//! turns them into typed values with `serde_json`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Stored values parsed but failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Serializes config values and delegates storage to a [`ConfigStore`].
#[derive(Debug)]
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Loads `key`, falling back to `T::default()` when nothing is stored, and
    /// runs `validate` on the result. Validation failures become
    /// [`ConfigError::Invalid`].
    pub fn load_validated<T, E, F>(&self, key: &str, validate: F) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
        E: Display,
        F: FnOnce(&T) -> Result<(), E>,
    {
        let value = self.load::<T>(key)?.unwrap_or_default();
        validate(&value).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(value)
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

/// In-memory [`ConfigStore`], handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Knobs {
        gain: f32,
        label: String,
    }

    fn positive_gain(k: &Knobs) -> Result<(), String> {
        if k.gain < 0.0 {
            return Err(format!("gain {} is negative", k.gain));
        }
        Ok(())
    }

    #[test]
    fn missing_and_empty_blobs_load_as_none() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert!(svc.load::<Knobs>("knobs").expect("load").is_none());
        svc.store().save_raw("knobs", b"").expect("save");
        assert!(svc.load::<Knobs>("knobs").expect("load").is_none());
    }

    #[test]
    fn save_then_load_returns_the_value() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        let knobs = Knobs {
            gain: 2.5,
            label: "coarse".into(),
        };
        svc.save("knobs", &knobs).expect("save");
        assert_eq!(svc.load::<Knobs>("knobs").expect("load"), Some(knobs));
    }

    #[test]
    fn load_validated_defaults_then_checks() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        let knobs: Knobs = svc.load_validated("knobs", positive_gain).expect("defaults");
        assert_eq!(knobs, Knobs::default());

        svc.store().save_raw("knobs", br#"{"gain": -1.0}"#).expect("save");
        let err = svc.load_validated::<Knobs, _, _>("knobs", positive_gain);
        assert!(matches!(err, Err(ConfigError::Invalid(msg)) if msg.contains("negative")));
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        svc.store().save_raw("knobs", b"{ not json").expect("save");
        assert!(matches!(
            svc.load::<Knobs>("knobs"),
            Err(ConfigError::Serde(_))
        ));
    }
}
