// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Comment-check verdict types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tri-state classification returned by a comment check
///
/// The numeric codes are stable: `0` for ham, `1` for spam and `2` for spam
/// the vendor is confident enough about to drop without storing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamVerdict {
    /// Legitimate content
    Ham,
    /// Content classified as spam
    Spam,
    /// Blatant spam, safe to discard outright
    Discard,
}

/// Error returned when converting an unknown numeric verdict code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown spam verdict code: {0}")]
pub struct InvalidVerdictCode(pub u8);

impl SpamVerdict {
    /// Numeric code of the verdict (0, 1 or 2)
    pub const fn code(self) -> u8 {
        match self {
            SpamVerdict::Ham => 0,
            SpamVerdict::Spam => 1,
            SpamVerdict::Discard => 2,
        }
    }

    /// Check if the verdict marks the content as spam of any kind
    pub fn is_spam(self) -> bool {
        matches!(self, SpamVerdict::Spam | SpamVerdict::Discard)
    }

    /// Check if the content can be dropped without being stored
    pub fn should_discard(self) -> bool {
        matches!(self, SpamVerdict::Discard)
    }

    /// Get a default message for this verdict
    pub fn default_message(self) -> &'static str {
        match self {
            SpamVerdict::Ham => "classified as legitimate",
            SpamVerdict::Spam => "classified as spam",
            SpamVerdict::Discard => "classified as blatant spam, safe to discard",
        }
    }
}

impl From<SpamVerdict> for u8 {
    fn from(verdict: SpamVerdict) -> Self {
        verdict.code()
    }
}

impl TryFrom<u8> for SpamVerdict {
    type Error = InvalidVerdictCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SpamVerdict::Ham),
            1 => Ok(SpamVerdict::Spam),
            2 => Ok(SpamVerdict::Discard),
            other => Err(InvalidVerdictCode(other)),
        }
    }
}

impl std::fmt::Display for SpamVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpamVerdict::Ham => write!(f, "ham"),
            SpamVerdict::Spam => write!(f, "spam"),
            SpamVerdict::Discard => write!(f, "discard"),
        }
    }
}
