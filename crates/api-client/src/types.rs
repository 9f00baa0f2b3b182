// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Common request types for spam-check API calls

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default sort order for activity reports
pub const DEFAULT_ACTIVITY_ORDER: &str = "total";
/// Default page size for activity reports
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 500;

/// Form fields sent with a request, keyed by field name
///
/// A sorted map keeps the encoded body deterministic.
pub type FormParams = BTreeMap<String, String>;

/// Query for the key-sites activity report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Month to report on, formatted `YYYY-MM`; the current month when absent
    pub month: Option<String>,
    /// Column to sort by
    pub order: String,
    /// Maximum number of sites to return
    pub limit: u32,
    /// Number of sites to skip
    pub offset: u32,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            month: None,
            order: DEFAULT_ACTIVITY_ORDER.to_string(),
            limit: DEFAULT_ACTIVITY_LIMIT,
            offset: 0,
        }
    }
}

impl ActivityQuery {
    /// Restrict the report to one month
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Set the sort column
    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page offset
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Form fields for this query; an absent month is left out entirely
    pub fn to_form(&self) -> FormParams {
        let mut form = FormParams::new();
        if let Some(ref month) = self.month {
            form.insert("month".to_string(), month.clone());
        }
        form.insert("order".to_string(), self.order.clone());
        form.insert("limit".to_string(), self.limit.to_string());
        form.insert("offset".to_string(), self.offset.to_string());
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_query_defaults() {
        let query = ActivityQuery::default();

        assert_eq!(query.month, None);
        assert_eq!(query.order, "total");
        assert_eq!(query.limit, 500);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn activity_form_omits_missing_month() {
        let form = ActivityQuery::default().to_form();

        assert!(!form.contains_key("month"));
        assert_eq!(form.get("order").map(String::as_str), Some("total"));
        assert_eq!(form.get("limit").map(String::as_str), Some("500"));
        assert_eq!(form.get("offset").map(String::as_str), Some("0"));
    }

    #[test]
    fn activity_form_with_overrides() {
        let form = ActivityQuery::default()
            .with_month("2025-03")
            .with_order("spam")
            .with_limit(20)
            .with_offset(40)
            .to_form();

        assert_eq!(form.get("month").map(String::as_str), Some("2025-03"));
        assert_eq!(form.get("order").map(String::as_str), Some("spam"));
        assert_eq!(form.get("limit").map(String::as_str), Some("20"));
        assert_eq!(form.get("offset").map(String::as_str), Some("40"));
    }
}
