//! Per-issue recurrence reports.
//!
//! A report condenses one issue's timeline into the numbers the rest
//! of the system cares about: how often the issue has been
//! cross-referenced and when that last happened. Reports serialize to
//! camelCase JSON for the report emitters.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tracker::{Issue, TimelineEvent};

/// Recurrence report for one flaky-test issue.
///
/// Immutable once derived; sorting and serialization work on copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    /// Issue number within its repository
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Count of well-formed cross-reference events on the timeline
    pub reference_count: u64,
    /// When the issue was opened
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last cross-reference, `None` if never referenced
    pub last_referenced_at: Option<DateTime<Utc>>,
}

impl IssueReport {
    /// Create a zero-count report for an issue.
    ///
    /// Used directly when an issue's timeline cannot be fetched: the
    /// issue still appears in the results, just with nothing counted.
    pub fn new(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            reference_count: 0,
            created_at: issue.created_at,
            last_referenced_at: None,
        }
    }

    /// Derive a report from an issue's timeline.
    ///
    /// Every well-formed cross-reference entry increments the count and
    /// overwrites the last-referenced timestamp, so the timestamp kept
    /// is that of the final qualifying entry in timeline order. Entries
    /// missing a source or an event kind are skipped. A qualifying
    /// entry that carries no timestamp still counts, but leaves the
    /// timestamp untouched rather than erasing a known one.
    pub fn from_timeline(issue: &Issue, timeline: &[TimelineEvent]) -> Self {
        let mut report = Self::new(issue);

        for entry in timeline {
            if !entry.is_cross_reference() {
                continue;
            }
            report.reference_count += 1;
            if entry.created_at.is_some() {
                report.last_referenced_at = entry.created_at;
            }
        }

        report
    }
}

/// Serialization container for a set of reports.
///
/// The wrapper object gives consumers a stable top-level shape:
/// `{"items": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportList {
    /// Reports in the order they were collected
    pub items: Vec<IssueReport>,
}

/// Return the reports ordered by ascending reference count.
///
/// The sort is stable: reports with equal counts keep the relative
/// order they have in `reports`. The input slice is left untouched.
pub fn sorted_by_reference_count(reports: &[IssueReport]) -> Vec<IssueReport> {
    let mut sorted = reports.to_vec();
    sorted.sort_by_key(|report| report.reference_count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{cross_reference, issue, other_event, sourceless_event, timestamp};

    #[test]
    fn test_report_from_empty_timeline() {
        let report = IssueReport::from_timeline(&issue(7, "quiet", "2021-01-01T00:00:00Z"), &[]);

        assert_eq!(report.number, 7);
        assert_eq!(report.title, "quiet");
        assert_eq!(report.reference_count, 0);
        assert!(report.last_referenced_at.is_none());
    }

    #[test]
    fn test_report_counts_cross_references() {
        let timeline = vec![
            cross_reference("2021-02-01T00:00:00Z"),
            other_event("labeled", "2021-02-02T00:00:00Z"),
            cross_reference("2021-02-03T00:00:00Z"),
        ];

        let report =
            IssueReport::from_timeline(&issue(7, "busy", "2021-01-01T00:00:00Z"), &timeline);

        assert_eq!(report.reference_count, 2);
        // Last qualifying entry in timeline order wins
        assert_eq!(
            report.last_referenced_at,
            Some(timestamp("2021-02-03T00:00:00Z"))
        );
    }

    #[test]
    fn test_report_skips_malformed_entries() {
        let timeline = vec![
            // Looks like a reference but has no source
            sourceless_event("cross-referenced", "2021-03-01T00:00:00Z"),
            cross_reference("2021-03-02T00:00:00Z"),
            TimelineEvent {
                event: None,
                created_at: Some(timestamp("2021-03-03T00:00:00Z")),
                source: Some(serde_json::json!({})),
            },
        ];

        let report =
            IssueReport::from_timeline(&issue(7, "noisy", "2021-01-01T00:00:00Z"), &timeline);

        assert_eq!(report.reference_count, 1);
        assert_eq!(
            report.last_referenced_at,
            Some(timestamp("2021-03-02T00:00:00Z"))
        );
    }

    #[test]
    fn test_undated_reference_counts_without_erasing_timestamp() {
        let timeline = vec![
            cross_reference("2021-05-01T00:00:00Z"),
            // Well-formed reference, just no date on it
            TimelineEvent {
                event: Some("cross-referenced".to_string()),
                created_at: None,
                source: Some(serde_json::json!({"issue": {"number": 8}})),
            },
        ];

        let report =
            IssueReport::from_timeline(&issue(7, "sparse", "2021-01-01T00:00:00Z"), &timeline);

        assert_eq!(report.reference_count, 2);
        assert_eq!(
            report.last_referenced_at,
            Some(timestamp("2021-05-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_report_ignores_other_event_kinds() {
        let timeline = vec![
            other_event("labeled", "2021-04-01T00:00:00Z"),
            other_event("commented", "2021-04-02T00:00:00Z"),
            other_event("closed", "2021-04-03T00:00:00Z"),
        ];

        let report =
            IssueReport::from_timeline(&issue(7, "tracked", "2021-01-01T00:00:00Z"), &timeline);

        assert_eq!(report.reference_count, 0);
        assert!(report.last_referenced_at.is_none());
    }

    #[test]
    fn test_sorted_by_reference_count_is_ascending_and_stable() {
        let reports: Vec<IssueReport> = [(1, 5), (2, 0), (3, 2), (4, 0), (5, 2)]
            .iter()
            .map(|&(number, count)| {
                let mut report = IssueReport::new(&issue(number, "t", "2021-01-01T00:00:00Z"));
                report.reference_count = count;
                report
            })
            .collect();

        let sorted = sorted_by_reference_count(&reports);

        let counts: Vec<u64> = sorted.iter().map(|r| r.reference_count).collect();
        assert_eq!(counts, vec![0, 0, 2, 2, 5]);

        // Ties keep collection order: 2 before 4, 3 before 5
        let numbers: Vec<u64> = sorted.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![2, 4, 3, 5, 1]);

        // The input is a view source, not a sort target
        let original: Vec<u64> = reports.iter().map(|r| r.number).collect();
        assert_eq!(original, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_report_list_serializes_camel_case() {
        let mut report = IssueReport::new(&issue(13133, "test flake: x", "2017-03-01T10:30:00Z"));
        report.reference_count = 4;
        report.last_referenced_at = Some(timestamp("2017-04-01T08:00:00Z"));

        let value = serde_json::to_value(ReportList {
            items: vec![report],
        })
        .unwrap();

        let item = &value["items"][0];
        assert_eq!(item["number"], 13133);
        assert_eq!(item["title"], "test flake: x");
        assert_eq!(item["referenceCount"], 4);
        assert_eq!(item["createdAt"], "2017-03-01T10:30:00Z");
        assert_eq!(item["lastReferencedAt"], "2017-04-01T08:00:00Z");
    }

    #[test]
    fn test_unreferenced_report_serializes_null_timestamp() {
        let value =
            serde_json::to_value(IssueReport::new(&issue(1, "t", "2021-01-01T00:00:00Z"))).unwrap();

        assert_eq!(value["referenceCount"], 0);
        assert!(value["lastReferencedAt"].is_null());
    }
}
