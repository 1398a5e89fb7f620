//! Plain-text report rendering.

use crate::sync::IssueReport;

/// Render reports as one `[number|count]: title` line each.
///
/// Lines come out in the order given; callers wanting the conventional
/// least-to-most-referenced listing should pass sorted reports.
pub fn render(reports: &[IssueReport]) -> String {
    let mut out = String::new();

    for report in reports {
        out.push_str(&format!(
            "[{}|{}]: {}\n",
            report.number, report.reference_count, report.title
        ));
    }

    out
}
