//! Message identifier value object

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::IdParseError;

/// Length of generated identifiers
const GENERATED_LEN: usize = 7;

/// Alphabet for generated identifiers (lowercase base-36)
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque message identifier.
///
/// Generated ids are short non-cryptographic base-36 strings; collision risk
/// is acceptable for a per-device library of this size, and longer ids would
/// only grow the QR symbol. Parsing accepts any non-empty string so that ids
/// scanned from foreign codes can still be looked up (and miss).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..GENERATED_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MessageId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError { input: s.to_string() });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
