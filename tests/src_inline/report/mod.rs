use super::*;
use crate::model::profile::DimensionProfile;
use crate::model::rating::Rating;
use crate::model::record::{Cohort, EvaluationRecord};
use crate::pipeline::run_comparison;
use crate::report::json::render_report_json;
use crate::report::text::render_report_text;

#[test]
fn test_format_helpers() {
    assert_eq!(format_opt(Some(0.12345), 3), "0.123");
    assert_eq!(format_opt(None, 3), "undefined");
    assert_eq!(format_signed_opt(Some(5.0), 1), "+5.0");
    assert_eq!(format_signed_opt(Some(-2.25), 2), "-2.25");
    assert_eq!(format_pct(Some(0.5)), "50.0%");
    assert_eq!(format_pct(None), "undefined");
}

fn disjoint_report() -> ComparisonReport {
    let a = Cohort::new(
        "baseline",
        vec![EvaluationRecord::new("1").with_rating("boot", Rating::Pass)],
    );
    let b = Cohort::new(
        "no_lint",
        vec![EvaluationRecord::new("2").with_rating("boot", Rating::Na)],
    );
    run_comparison(&a, &b, &DimensionProfile::default_v1())
}

#[test]
fn test_text_marks_undefined_and_fallback() {
    let text = render_report_text(&disjoint_report());
    assert!(text.contains("WARNING: no common case ids"));
    assert!(text.contains("Cohen's d: undefined"));
    assert!(text.contains("no data"));
    assert!(text.contains("for reference"));
}

#[test]
fn test_json_undefined_as_null() {
    let json = render_report_json(&disjoint_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["alignment"]["status"], "no_common_cases");
    assert!(value["quality"]["comparison"]["cohens_d"].is_null());
    let boot = &value["dimensions"][0];
    assert_eq!(boot["ablation"]["rate"]["kind"], "undefined");
    assert_eq!(boot["baseline"]["rate"]["kind"], "rate");
    assert_eq!(boot["baseline"]["rate"]["value"], 1.0);
    assert!(boot["comparison"]["delta_pp"].is_null());
}
