use crate::report::ComparisonReport;

pub fn render_report_json(report: &ComparisonReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// All comparisons of one run as a single JSON array.
pub fn render_batch_json(reports: &[ComparisonReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
