//! Decoded remote payloads that keep their original JSON
//!
//! [`Remote<T>`] deserializes a response body twice: once into the typed
//! model `T` and once into a raw [`serde_json::Value`]. Typed access goes
//! through `Deref`; serialization writes the raw value back unchanged, so a
//! rendered payload carries every field the service sent, in the service's
//! order, including fields `T` does not model.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq)]
pub struct Remote<T> {
    typed: T,
    raw: Value,
}

impl<T: Serialize> Remote<T> {
    /// Wrap a locally built value; its raw form is its own serialization.
    pub fn new(typed: T) -> Result<Self, serde_json::Error> {
        let raw = serde_json::to_value(&typed)?;
        Ok(Self { typed, raw })
    }
}

impl<T: DeserializeOwned> Remote<T> {
    /// Decode a raw JSON value, keeping it as sent.
    pub fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        let typed = T::deserialize(&raw)?;
        Ok(Self { typed, raw })
    }
}

impl<T> Remote<T> {
    /// The JSON exactly as the service sent it
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.typed
    }
}

impl<T> Deref for Remote<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.typed
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Remote<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(D::Error::custom)
    }
}

impl<T> Serialize for Remote<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
