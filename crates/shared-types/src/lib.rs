// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the Akismet client workspace
//!
//! This crate provides the small vocabulary types that both the generic
//! `api-client` abstractions and the concrete `akismet` client speak,
//! avoiding circular dependencies between them.

pub mod feedback;
pub mod spam_verdict;

pub use feedback::FeedbackKind;
pub use spam_verdict::{InvalidVerdictCode, SpamVerdict};
