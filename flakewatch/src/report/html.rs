//! Self-contained HTML report rendering.
//!
//! Produces a single Bootstrap-styled document that refreshes itself
//! every 30 seconds, suitable for pinning to a team dashboard. Each
//! report becomes a table row with a progress bar showing its
//! reference count relative to the most-referenced issue.

use chrono::{DateTime, Utc};

use crate::sync::IssueReport;

// Fixed document shell, refreshing itself every 30 seconds.
const DOCUMENT_HEAD: &str = r#"<html>
<head>
<meta http-equiv="refresh" content="30">
<title>flaky-test report</title>
<!-- Latest compiled and minified CSS -->
<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css" integrity="sha384-BVYiiSIFeK1dGmJRAkycuHAHRg32OmUcww7on3RYdg4Va+PmSTsz/K68vbdEjh4u" crossorigin="anonymous">
<!-- Optional theme -->
<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap-theme.min.css" integrity="sha384-rHyoN1iRsVXV4nD0JutlnGaslCJuC7uwjduW9SVrLvRYooPp2bWYgmgJQIXwl/Sp" crossorigin="anonymous">
<style>
* { font-size: small; }
</style>
</head>
<body>
<table class="table table-hover table-striped">
<tr>
  <th>Issue</th>
  <th>Title</th>
  <th width="100">Rate</th>
  <th>Last occurred</th>
  <th>Created</th>
</tr>
"#;

const DOCUMENT_FOOT: &str = "</table>\n</body>\n</html>\n";

/// Render reports as a self-contained HTML document.
///
/// `owner` and `repo` form the issue links. Reports are emitted in the
/// order given; callers conventionally pass count-sorted reports so
/// the busiest flakes end up at the bottom.
pub fn render(owner: &str, repo: &str, reports: &[IssueReport]) -> String {
    render_at(owner, repo, reports, Utc::now())
}

fn render_at(
    owner: &str,
    repo: &str,
    reports: &[IssueReport],
    now: DateTime<Utc>,
) -> String {
    let max = reports
        .iter()
        .map(|report| report.reference_count)
        .max()
        .unwrap_or(0);

    let mut out = String::from(DOCUMENT_HEAD);

    for report in reports {
        let percent = percentage(report.reference_count, max);
        let last_occurred = match report.last_referenced_at {
            Some(at) => age(now, at),
            None => "never".to_string(),
        };

        out.push_str(&format!(
            r#"<tr>
  <td><a href="https://github.com/{owner}/{repo}/issues/{number}">#{number}</a></td>
  <td>{title}</td>
  <td>
    <div class="progress">
      <div class="progress-bar" role="progressbar" aria-valuenow="{percent}" aria-valuemin="0" aria-valuemax="100" style="width: {percent}%;">{count}</div>
    </div>
  </td>
  <td>{last_occurred}</td>
  <td>{created}</td>
</tr>
"#,
            owner = escape(owner),
            repo = escape(repo),
            number = report.number,
            title = escape(&report.title),
            percent = percent,
            count = report.reference_count,
            last_occurred = last_occurred,
            created = age(now, report.created_at),
        ));
    }

    out.push_str(DOCUMENT_FOOT);
    out
}

/// Reference count as a share of the busiest issue, in whole percent.
fn percentage(count: u64, max: u64) -> u64 {
    if count == 0 || max == 0 {
        return 0;
    }
    (count as f64 / max as f64 * 100.0) as u64
}

/// Escape text for safe embedding in HTML content and attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Describe how long ago `at` was, in the largest sensible unit.
fn age(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return counted(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return counted(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 30 {
        return counted(days, "day");
    }
    if days < 365 {
        return counted(days / 30, "month");
    }
    counted(days / 365, "year")
}

fn counted(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{issue, timestamp};

    fn report(number: u64, title: &str, count: u64) -> IssueReport {
        let mut report = IssueReport::new(&issue(number, title, "2021-01-01T00:00:00Z"));
        report.reference_count = count;
        report
    }

    #[test]
    fn test_render_links_each_issue() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let out = render_at(
            "openshift",
            "origin",
            &[report(13133, "test flake: TestWatchers", 3)],
            now,
        );

        assert!(out.contains(r#"<a href="https://github.com/openshift/origin/issues/13133">#13133</a>"#));
        assert!(out.contains("test flake: TestWatchers"));
    }

    #[test]
    fn test_render_scales_progress_against_busiest_issue() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let out = render_at(
            "o",
            "r",
            &[report(1, "quiet", 0), report(2, "half", 5), report(3, "busiest", 10)],
            now,
        );

        assert!(out.contains(r#"aria-valuenow="0""#));
        assert!(out.contains(r#"aria-valuenow="50""#));
        assert!(out.contains(r#"aria-valuenow="100""#));
    }

    #[test]
    fn test_render_escapes_titles() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let out = render_at(
            "o",
            "r",
            &[report(1, r#"flake in <TestRun> & "friends""#, 1)],
            now,
        );

        assert!(out.contains("flake in &lt;TestRun&gt; &amp; &quot;friends&quot;"));
        assert!(!out.contains("<TestRun>"));
    }

    #[test]
    fn test_render_marks_unreferenced_issues_as_never() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let out = render_at("o", "r", &[report(1, "quiet", 0)], now);

        assert!(out.contains("<td>never</td>"));
    }

    #[test]
    fn test_render_shows_last_reference_age() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let mut busy = report(1, "busy", 2);
        busy.last_referenced_at = Some(timestamp("2021-05-30T00:00:00Z"));

        let out = render_at("o", "r", &[busy], now);

        assert!(out.contains("<td>2 days ago</td>"));
    }

    #[test]
    fn test_render_is_a_complete_refreshing_document() {
        let now = timestamp("2021-06-01T00:00:00Z");
        let out = render_at("o", "r", &[], now);

        assert!(out.starts_with("<html>"));
        assert!(out.trim_end().ends_with("</html>"));
        assert!(out.contains(r#"<meta http-equiv="refresh" content="30">"#));
    }

    #[test]
    fn test_percentage_rounds_down() {
        assert_eq!(percentage(0, 10), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(3, 3), 100);
        // An all-zero table renders flat bars instead of dividing by zero
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_age_picks_largest_sensible_unit() {
        let now = timestamp("2021-06-01T12:00:00Z");

        assert_eq!(age(now, timestamp("2021-06-01T11:59:40Z")), "just now");
        assert_eq!(age(now, timestamp("2021-06-01T11:55:00Z")), "5 minutes ago");
        assert_eq!(age(now, timestamp("2021-06-01T11:00:00Z")), "1 hour ago");
        assert_eq!(age(now, timestamp("2021-05-29T12:00:00Z")), "3 days ago");
        assert_eq!(age(now, timestamp("2021-03-01T12:00:00Z")), "3 months ago");
        assert_eq!(age(now, timestamp("2019-06-01T12:00:00Z")), "2 years ago");
    }
}
