// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Construction options.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UsageError};

/// What to do when two resources share a `(type, id)` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later resource replaces the earlier one. Primary data is inserted
    /// after `included`, so a primary resource always wins.
    #[default]
    LastWins,
    /// An identity repeated within `included`, or within a primary data
    /// array, is a usage error. A primary resource may still replace its
    /// `included` copy.
    Reject,
}

/// Options for building a [`Document`](crate::Document).
///
/// Serialized as a JSON object; missing keys take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Handling of repeated identities.
    pub duplicates: DuplicatePolicy,
}

impl Options {
    /// Set the duplicate policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Load options from a JSON blob. An empty blob yields the defaults.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
            .map_err(|err| UsageError::malformed("options", err.to_string()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_last_duplicate() {
        assert_eq!(Options::default().duplicates, DuplicatePolicy::LastWins);
    }

    #[test]
    fn loads_from_json() {
        let opts = Options::from_json_slice(br#"{"duplicates": "reject"}"#).unwrap();
        assert_eq!(opts.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn empty_blob_and_missing_keys_use_defaults() {
        assert_eq!(Options::from_json_slice(b"").unwrap(), Options::default());
        assert_eq!(Options::from_json_slice(b"{}").unwrap(), Options::default());
    }

    #[test]
    fn unknown_policy_is_a_usage_error() {
        let err = Options::from_json_slice(br#"{"duplicates": "first_wins"}"#).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().starts_with("malformed options: "));
    }

    #[test]
    fn round_trips_through_serde() {
        let opts = Options::default().with_duplicates(DuplicatePolicy::Reject);
        let text = serde_json::to_string(&opts).unwrap();
        assert_eq!(text, r#"{"duplicates":"reject"}"#);
    }
}
