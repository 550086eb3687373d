use crate::model::effect::EffectMagnitude;
use crate::model::profile::{DimensionProfile, normalize_dimension};
use crate::model::rates::{DimensionRate, RateValue};
use crate::model::rating::Rating;
use crate::model::record::{Cohort, EvaluationRecord};

#[test]
fn test_rating_parse_lenient() {
    assert_eq!(Rating::parse_lenient("PASS"), Rating::Pass);
    assert_eq!(Rating::parse_lenient(" warn "), Rating::Warn);
    assert_eq!(Rating::parse_lenient("Fail"), Rating::Fail);
    assert_eq!(Rating::parse_lenient("NA"), Rating::Na);
    assert_eq!(Rating::parse_lenient("maybe"), Rating::Na);
    assert_eq!(Rating::parse_lenient(""), Rating::Na);
    assert_eq!(Rating::parse_strict("maybe"), None);
}

#[test]
fn test_quality_weights() {
    assert_eq!(Rating::Pass.quality_weight(), Some(1.0));
    assert_eq!(Rating::Warn.quality_weight(), Some(0.5));
    assert_eq!(Rating::Fail.quality_weight(), Some(0.0));
    assert_eq!(Rating::Na.quality_weight(), None);
    assert!(!Rating::Na.is_applicable());
}

#[test]
fn test_normalize_dimension_folds_hyphens() {
    assert_eq!(normalize_dimension("Prompt\u{2011}Adherence"), "prompt-adherence");
    assert_eq!(normalize_dimension("  view\u{2013}edit "), "view-edit");
    assert_eq!(normalize_dimension("boot"), "boot");
}

#[test]
fn test_default_profile() {
    let p = DimensionProfile::default_v1();
    assert_eq!(p.critical, vec!["boot", "prompt-adherence"]);
    assert_eq!(p.quality.len(), 6);
    assert_eq!(p.wilson_z, 1.96);
    assert!(p.yates_correction);
    assert!(p.validate().is_ok());
}

#[test]
fn test_profile_override_partial() {
    let p = DimensionProfile::from_json_str(
        "{\"critical\": [\"Boot\", \"Prompt\u{2011}Adherence\", \"boot\"], \"yates_correction\": false}",
    )
    .unwrap();
    assert_eq!(p.critical, vec!["boot", "prompt-adherence"]);
    assert!(!p.yates_correction);
    assert_eq!(p.quality, DimensionProfile::default_v1().quality);
}

#[test]
fn test_profile_rejects_empty_and_unknown() {
    assert!(DimensionProfile::from_json_str(r#"{"quality": []}"#).is_err());
    assert!(DimensionProfile::from_json_str(r#"{"wilson_z": 0.0}"#).is_err());
    assert!(DimensionProfile::from_json_str(r#"{"thresholds": 1}"#).is_err());
}

#[test]
fn test_rate_value_undefined_is_distinct() {
    let undefined = RateValue::from_counts(0, 0);
    let zero = RateValue::from_counts(0, 4);
    assert!(undefined.is_undefined());
    assert_eq!(zero, RateValue::Rate(0.0));
    assert_ne!(undefined, zero);
    assert_eq!(undefined.or_zero(), 0.0);
    assert_eq!(undefined.defined(), None);
}

#[test]
fn test_breakdown_pct() {
    let rate = DimensionRate {
        dimension: "create".to_string(),
        non_na_count: 4,
        pass_count: 2,
        warn_count: 1,
        fail_count: 1,
        rate: RateValue::Rate(0.5),
    };
    assert_eq!(rate.breakdown_pct(), Some([50.0, 25.0, 25.0]));
    assert_eq!(rate.non_pass_count(), 2);

    let empty = DimensionRate {
        dimension: "create".to_string(),
        non_na_count: 0,
        pass_count: 0,
        warn_count: 0,
        fail_count: 0,
        rate: RateValue::Undefined,
    };
    assert_eq!(empty.breakdown_pct(), None);
    assert_eq!(empty.pass_rate(), 0.0);
}

#[test]
fn test_effect_magnitude_bands() {
    assert_eq!(EffectMagnitude::classify(0.1), EffectMagnitude::Negligible);
    assert_eq!(EffectMagnitude::classify(-0.3), EffectMagnitude::Small);
    assert_eq!(EffectMagnitude::classify(0.726), EffectMagnitude::Medium);
    assert_eq!(EffectMagnitude::classify(1.2), EffectMagnitude::Large);
}

#[test]
fn test_record_missing_dimension_reads_na() {
    let r = EvaluationRecord::new("1").with_rating("boot", Rating::Pass);
    assert_eq!(r.rating("boot"), Rating::Pass);
    assert_eq!(r.rating("create"), Rating::Na);
}

#[test]
fn test_cohort_dimension_names_sorted_union() {
    let cohort = Cohort::new(
        "baseline",
        vec![
            EvaluationRecord::new("1").with_rating("create", Rating::Pass),
            EvaluationRecord::new("2")
                .with_rating("boot", Rating::Fail)
                .with_rating("create", Rating::Na),
        ],
    );
    assert_eq!(cohort.dimension_names(), vec!["boot", "create"]);
}

#[test]
fn test_non_pass_count_never_underflows() {
    let inconsistent = DimensionRate {
        dimension: "boot".to_string(),
        non_na_count: 1,
        pass_count: 2,
        warn_count: 0,
        fail_count: 0,
        rate: RateValue::Undefined,
    };
    assert_eq!(inconsistent.non_pass_count(), 0);
}

#[test]
fn test_normalize_dimension_folds_slash() {
    assert_eq!(normalize_dimension("View/Edit"), "view-edit");
    assert!(DimensionProfile::default_v1()
        .quality
        .contains(&normalize_dimension("view/edit")));
}
