use super::*;

fn summary(n: usize, mean: f64, std_dev: f64) -> SampleSummary {
    SampleSummary { n, mean, std_dev }
}

#[test]
fn test_delta_pp() {
    assert!((delta_pp(0.9, 0.6) + 30.0).abs() < 1e-9);
    assert!((delta_pp(0.5, 0.75) - 25.0).abs() < 1e-9);
}

#[test]
fn test_cohens_h_worked_example() {
    let h = cohens_h(0.9, 0.6).unwrap();
    let expected = 2.0 * (0.9f64.sqrt().asin() - 0.6f64.sqrt().asin());
    assert!((h - expected).abs() < 1e-12);
    assert!((h - 0.7259).abs() < 1e-3);
    assert_eq!(EffectMagnitude::classify(h), EffectMagnitude::Medium);
}

#[test]
fn test_cohens_h_antisymmetric() {
    for (p1, p2) in [(0.9, 0.6), (0.0, 1.0), (0.33, 0.5), (0.2, 0.2)] {
        let forward = cohens_h(p1, p2).unwrap();
        let backward = cohens_h(p2, p1).unwrap();
        assert!((forward + backward).abs() < 1e-12);
    }
}

#[test]
fn test_cohens_h_closed_interval() {
    let h = cohens_h(1.0, 0.0).unwrap();
    assert!((h - std::f64::consts::PI).abs() < 1e-12);
    assert!(cohens_h(1.1, 0.5).is_none());
    assert!(cohens_h(-0.1, 0.5).is_none());
}

#[test]
fn test_cohens_d_pooled() {
    // Scores [10, 7.5, 5, 10] vs [5, 2.5, 5, 7.5].
    let a = summary(4, 8.125, 2.393_567_769_390_845_3);
    let b = summary(4, 5.0, 2.041_241_452_319_315);
    let d = cohens_d(&a, &b).unwrap();
    assert!((d - 1.404_878_717_372_541).abs() < 1e-9);
    assert!(cohens_d(&b, &a).unwrap() < 0.0);
}

#[test]
fn test_cohens_d_guards() {
    assert!(cohens_d(&summary(1, 5.0, 0.0), &summary(1, 3.0, 0.0)).is_none());
    assert!(cohens_d(&summary(5, 5.0, 0.0), &summary(5, 3.0, 0.0)).is_none());
    assert!(pooled_std(&summary(2, 5.0, 1.0), &summary(0, 0.0, 0.0)).is_none());
}

#[test]
fn test_wilson_worked_example() {
    let ci = wilson_interval(0.5, 30, 1.96).unwrap();
    assert!((ci.lower - 0.331_538_5).abs() < 1e-6);
    assert!((ci.upper - 0.668_461_5).abs() < 1e-6);
}

#[test]
fn test_wilson_bounds() {
    for n in [1usize, 2, 5, 30, 200] {
        for k in 0..=n {
            let p = k as f64 / n as f64;
            let ci = wilson_interval(p, n, 1.96).unwrap();
            assert!(0.0 <= ci.lower);
            assert!(ci.lower <= ci.upper);
            assert!(ci.upper <= 1.0);
        }
    }
}

#[test]
fn test_wilson_zero_trials_undefined() {
    assert!(wilson_interval(0.0, 0, 1.96).is_none());
}

#[test]
fn test_chi_square_uncorrected() {
    let chi = chi_square_2x2([[20, 10], [10, 20]], false).unwrap();
    assert!((chi.statistic - 20.0 / 3.0).abs() < 1e-9);
    assert!((chi.p_value - 0.009_823_274_5).abs() < 1e-6);
    assert!(!chi.yates_corrected);
}

#[test]
fn test_chi_square_yates() {
    let chi = chi_square_2x2([[20, 10], [10, 20]], true).unwrap();
    assert!((chi.statistic - 5.4).abs() < 1e-9);
    assert!((chi.p_value - 0.020_136_751_6).abs() < 1e-6);
}

#[test]
fn test_chi_square_identical_rows() {
    let chi = chi_square_2x2([[5, 5], [5, 5]], true).unwrap();
    assert_eq!(chi.statistic, 0.0);
    assert!((chi.p_value - 1.0).abs() < 1e-12);
}

#[test]
fn test_chi_square_degenerate_margins() {
    assert!(chi_square_2x2([[10, 0], [8, 0]], true).is_none());
    assert!(chi_square_2x2([[0, 0], [3, 4]], false).is_none());
}

#[test]
fn test_compare_proportions() {
    let c = compare_proportions(27, 30, 18, 30, 1.96, true);
    assert!((c.delta_pp.unwrap() + 30.0).abs() < 1e-9);
    assert!((c.cohens_h.unwrap() - 0.7259).abs() < 1e-3);
    assert_eq!(c.magnitude, Some(EffectMagnitude::Medium));
    assert!(c.ci_baseline.is_some());
    assert!(c.ci_ablation.is_some());
    assert!(c.chi_square.is_some());
}

#[test]
fn test_compare_proportions_empty_side() {
    let c = compare_proportions(3, 4, 0, 0, 1.96, true);
    assert!(c.delta_pp.is_none());
    assert!(c.cohens_h.is_none());
    assert!(c.magnitude.is_none());
    assert!(c.ci_baseline.is_some());
    assert!(c.ci_ablation.is_none());
    assert!(c.chi_square.is_none());
}

#[test]
fn test_compare_means() {
    let m = compare_means(Some(summary(4, 8.0, 1.0)), Some(summary(4, 6.0, 1.0)));
    assert!((m.delta_absolute.unwrap() + 2.0).abs() < 1e-12);
    assert!((m.cohens_d.unwrap() - 2.0).abs() < 1e-12);
    assert_eq!(m.magnitude, Some(EffectMagnitude::Large));

    let missing = compare_means(Some(summary(4, 8.0, 1.0)), None);
    assert!(missing.delta_absolute.is_none());
    assert!(missing.cohens_d.is_none());
}

#[test]
fn test_compare_proportions_successes_exceed_trials() {
    let c = compare_proportions(5, 3, 1, 2, 1.96, true);
    assert!(c.delta_pp.is_none());
    assert!(c.cohens_h.is_none());
    assert!(c.ci_baseline.is_none());
    assert!(c.ci_ablation.is_some());
    assert!(c.chi_square.is_none());
}
