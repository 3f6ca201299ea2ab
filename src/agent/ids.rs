//! Session and message identifiers.
//!
//! Ids are only used for local keying and request correlation, never for
//! persistence, so the timestamp fallback is allowed to be best-effort.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// How fresh identifiers are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Random UUID v4.
    #[default]
    Uuid,
    /// Base-36 timestamp plus a short random suffix.
    Timestamp,
}

impl IdStrategy {
    pub fn generate(self) -> String {
        match self {
            IdStrategy::Uuid => Uuid::new_v4().to_string(),
            IdStrategy::Timestamp => timestamp_id(),
        }
    }
}

/// Produces an id with the preferred strategy.
pub fn generate() -> String {
    IdStrategy::default().generate()
}

fn timestamp_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    format!("{}-{}", to_base36(millis), random_suffix(millis))
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return String::from("0");
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_suffix(seed: u128) -> String {
    // RandomState is keyed per instance, which is enough entropy for keying.
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(seed);
    let mut value = hasher.finish();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    suffix
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(strategy: IdStrategy) -> Self {
                Self(strategy.generate())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Key of a single chat message.
    MessageId
);
define_id!(
    /// Correlation id sent with every translation request of a session.
    TunnelId
);
