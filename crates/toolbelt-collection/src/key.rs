//! Collection keys.
//!
//! A [`Key`] is either an integer index or a string name. Strings holding the
//! canonical decimal form of an integer are normalized to integer keys, so
//! `"12"` and `12` address the same slot while `"012"` stays a name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The key an element is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged, from = "RawKey")]
pub enum Key {
    /// Integer index.
    Index(i64),
    /// String name.
    Name(String),
}

/// Wire form of a key; strings are normalized on the way in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Index(i64),
    Name(String),
}

impl From<RawKey> for Key {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Index(index) => Key::Index(index),
            RawKey::Name(name) => Key::from(name),
        }
    }
}

impl Key {
    /// Returns `true` if this is an integer key.
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns `true` if this is a string key.
    pub fn is_name(&self) -> bool {
        matches!(self, Key::Name(_))
    }

    /// Extracts the integer index, if present.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Extracts the string name, if present.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    fn normalize(name: &str) -> Key {
        match name.parse::<i64>() {
            Ok(index) if index.to_string() == name => Key::Index(index),
            _ => Key::Name(name.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Key::Index(i64::from(index))
    }
}

/// Indexes above `i64::MAX` saturate.
impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::normalize(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match Key::normalize(&name) {
            Key::Index(index) => Key::Index(index),
            Key::Name(_) => Key::Name(name),
        }
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
