//! Reshape the backend's dashboard summary into chart-ready series.

use memoir_api::DashboardSummary;

/// Weekday order used by the weekly activity chart.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Moods that always lead the distribution, in this order.
const PRIMARY_MOODS: [&str; 3] = ["positive", "neutral", "negative"];

/// Dashboard data in the shape the charts consume.
///
/// Pure reshaping of [`DashboardSummary`]: label/value pairs in stable
/// order, stringly counts parsed, missing categories filled with zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_entries: u64,
    pub assistant_queries: u64,
    pub avg_entry_length: u64,
    pub mood_trend: String,
    /// (month label, entry count), backend order preserved
    pub entries_over_time: Vec<(String, u64)>,
    /// (mood, count); positive/neutral/negative first, extras sorted by name
    pub mood_distribution: Vec<(String, u64)>,
    /// Entry counts Mon..Sun
    pub weekly_activity: [u64; 7],
}

impl DashboardStats {
    /// Zeroed stats, used when the summary fetch fails.
    pub fn empty() -> Self {
        Self::from_summary(DashboardSummary::default())
    }

    pub fn from_summary(summary: DashboardSummary) -> Self {
        let entries_over_time = summary
            .entries_over_time
            .into_iter()
            .map(|point| (point.date, point.entries.value()))
            .collect();

        let mut moods = summary.mood_distribution;
        let mut mood_distribution: Vec<(String, u64)> = PRIMARY_MOODS
            .iter()
            .map(|name| (name.to_string(), moods.remove(*name).unwrap_or(0)))
            .collect();
        let mut extras: Vec<(String, u64)> = moods.into_iter().collect();
        extras.sort_by(|a, b| a.0.cmp(&b.0));
        mood_distribution.extend(extras);

        let mut weekly_activity = [0u64; 7];
        for (i, day) in WEEKDAYS.iter().enumerate() {
            weekly_activity[i] = summary.weekly_activity.get(*day).copied().unwrap_or(0);
        }

        let mood_trend = if summary.mood_trend.is_empty() {
            "neutral".to_string()
        } else {
            summary.mood_trend
        };

        Self {
            total_entries: summary.total_entries,
            assistant_queries: summary.assistant_queries,
            avg_entry_length: summary.avg_entry_length,
            mood_trend,
            entries_over_time,
            mood_distribution,
            weekly_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoir_api::{CountField, MonthlyCount};
    use std::collections::HashMap;

    fn summary() -> DashboardSummary {
        DashboardSummary {
            total_entries: 24,
            assistant_queries: 8,
            avg_entry_length: 342,
            mood_trend: "positive".to_string(),
            entries_over_time: vec![
                MonthlyCount {
                    date: "2024-05".to_string(),
                    entries: CountField::Text("4".to_string()),
                },
                MonthlyCount {
                    date: "2024-06".to_string(),
                    entries: CountField::Text("not a number".to_string()),
                },
            ],
            mood_distribution: HashMap::from([
                ("negative".to_string(), 3),
                ("reflective".to_string(), 2),
                ("positive".to_string(), 15),
            ]),
            weekly_activity: HashMap::from([
                ("Mon".to_string(), 3),
                ("Fri".to_string(), 5),
                ("Sun".to_string(), 1),
            ]),
        }
    }

    #[test]
    fn test_entries_over_time_parses_stringly_counts() {
        let stats = DashboardStats::from_summary(summary());
        assert_eq!(
            stats.entries_over_time,
            vec![("2024-05".to_string(), 4), ("2024-06".to_string(), 0)]
        );
    }

    #[test]
    fn test_mood_distribution_fixed_order_with_zero_fill() {
        let stats = DashboardStats::from_summary(summary());
        assert_eq!(
            stats.mood_distribution,
            vec![
                ("positive".to_string(), 15),
                ("neutral".to_string(), 0),
                ("negative".to_string(), 3),
                ("reflective".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_weekly_activity_ordered_mon_to_sun() {
        let stats = DashboardStats::from_summary(summary());
        assert_eq!(stats.weekly_activity, [3, 0, 0, 0, 5, 0, 1]);
    }

    #[test]
    fn test_empty_matches_default_summary() {
        let stats = DashboardStats::empty();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.mood_trend, "neutral");
        assert_eq!(stats.weekly_activity, [0; 7]);
        assert_eq!(
            stats.mood_distribution,
            vec![
                ("positive".to_string(), 0),
                ("neutral".to_string(), 0),
                ("negative".to_string(), 0),
            ]
        );
        assert!(stats.entries_over_time.is_empty());
        assert_eq!(stats, DashboardStats::from_summary(DashboardSummary::default()));
    }
}
