// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Feedback submission kinds

use serde::{Deserialize, Serialize};

/// Correction sent back to the classifier after a human review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Content the classifier missed and should have flagged
    Spam,
    /// Content the classifier flagged by mistake
    Ham,
}

impl FeedbackKind {
    /// Wire name of the feedback kind
    pub const fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Spam => "spam",
            FeedbackKind::Ham => "ham",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_names() {
        assert_eq!(FeedbackKind::Spam.as_str(), "spam");
        assert_eq!(FeedbackKind::Ham.to_string(), "ham");
        assert_eq!(
            serde_json::to_string(&FeedbackKind::Ham).unwrap(),
            "\"ham\""
        );
    }
}
