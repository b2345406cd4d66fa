//! Identifiers for containers and items
//!
//! ID Format:
//! - Container IDs: `c-{7-char-hash}` (e.g., `c-7f2b4c1`)
//! - Item IDs: `i-{7-char-hash}` (e.g., `i-9d3e5f2`)
//!
//! Generated IDs hash a seed label + timestamp + attempt counter. Boards loaded
//! from elsewhere may carry any non-empty string as an ID; only uniqueness
//! within the board matters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid ID: must not be empty")]
    Empty,

    #[error("Invalid ID '{0}': must not contain whitespace")]
    Whitespace(String),
}

/// Generates a 7-character hash from a seed label, timestamp and attempt
fn generate_hash(seed: &str, timestamp: DateTime<Utc>, attempt: u32) -> String {
    let input = format!(
        "{}{}{}",
        seed,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        attempt
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

fn validate(s: &str) -> Result<(), IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(IdError::Whitespace(s.to_string()));
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh ID from a seed label and timestamp
            pub fn generate(seed: &str, timestamp: DateTime<Utc>, attempt: u32) -> Self {
                Self(format!("{}-{}", $prefix, generate_hash(seed, timestamp, attempt)))
            }

            /// Returns the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                validate(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Container (lane/column) identifier, e.g. `c-7f2b4c1` or `todo`
    ContainerId,
    "c"
);

string_id!(
    /// Item identifier, unique across the whole board
    ItemId,
    "i"
);
