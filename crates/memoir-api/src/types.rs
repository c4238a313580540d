//! Request and response types for the diary backend endpoints.
//!
//! All response types deserialize leniently: fields default when missing so
//! a partially-shaped body degrades instead of failing the whole request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body for `POST /analyze_diary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

/// Response from `POST /analyze_diary`. The backend may omit the answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub answer: Option<String>,
}

/// Body for `POST /save_diary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub entry: String,
}

/// Response from `POST /save_diary`. Informational only; callers key off
/// the HTTP status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveResponse {
    pub status: String,
    pub message: String,
}

/// One element of the `GET /diary/all` response.
///
/// Older backends return bare strings, newer ones return objects with an
/// optional timestamp. Accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntryRecord {
    Text(String),
    Detailed {
        entry: String,
        #[serde(default)]
        timestamp: Option<DateTime<Utc>>,
    },
}

impl EntryRecord {
    /// The entry text regardless of wire shape.
    pub fn text(&self) -> &str {
        match self {
            EntryRecord::Text(s) => s,
            EntryRecord::Detailed { entry, .. } => entry,
        }
    }

    /// The timestamp, when the backend provided one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            EntryRecord::Text(_) => None,
            EntryRecord::Detailed { timestamp, .. } => *timestamp,
        }
    }
}

/// A count the backend serializes either as a number or a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountField {
    Number(u64),
    Text(String),
}

impl Default for CountField {
    fn default() -> Self {
        CountField::Number(0)
    }
}

impl CountField {
    /// Numeric value, 0 when the string form does not parse.
    pub fn value(&self) -> u64 {
        match self {
            CountField::Number(n) => *n,
            CountField::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// One point of the entries-over-time series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyCount {
    /// Month label, e.g. "2024-06"
    pub date: String,
    pub entries: CountField,
}

/// Response from `GET /api/dashboard/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_entries: u64,
    pub assistant_queries: u64,
    pub avg_entry_length: u64,
    pub mood_trend: String,
    pub entries_over_time: Vec<MonthlyCount>,
    pub mood_distribution: HashMap<String, u64>,
    pub weekly_activity: HashMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_record_bare_string() {
        let records: Vec<EntryRecord> =
            serde_json::from_str(r#"["June 1, 2024:\nWent for a run."]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text(), "June 1, 2024:\nWent for a run.");
        assert!(records[0].timestamp().is_none());
    }

    #[test]
    fn test_entry_record_object_shape() {
        let records: Vec<EntryRecord> = serde_json::from_str(
            r#"[{"entry": "Slept in.", "timestamp": "2024-06-02T08:30:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].text(), "Slept in.");
        assert!(records[0].timestamp().is_some());
    }

    #[test]
    fn test_count_field_parses_strings() {
        assert_eq!(CountField::Text("7".into()).value(), 7);
        assert_eq!(CountField::Text(" 12 ".into()).value(), 12);
        assert_eq!(CountField::Text("seven".into()).value(), 0);
        assert_eq!(CountField::Number(3).value(), 3);
    }

    #[test]
    fn test_analyze_response_missing_answer() {
        let resp: AnalyzeResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.answer.is_none());
    }

    #[test]
    fn test_dashboard_summary_partial_body() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"total_entries": 24, "entries_over_time": [{"date": "2024-05", "entries": "4"}]}"#,
        )
        .unwrap();
        assert_eq!(summary.total_entries, 24);
        assert_eq!(summary.assistant_queries, 0);
        assert_eq!(summary.mood_trend, "");
        assert_eq!(summary.entries_over_time[0].entries.value(), 4);
        assert!(summary.mood_distribution.is_empty());
    }
}
