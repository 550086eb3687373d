pub mod stage1_align;
pub mod stage2_viability;
pub mod stage3_quality;
pub mod stage4_rates;
pub mod stage5_effects;
pub mod stage6_report;

use tracing::{debug, info, warn};

use crate::model::profile::DimensionProfile;
use crate::model::record::Cohort;
use crate::report::ComparisonReport;
use stage1_align::{AlignmentStatus, align_cohorts};
use stage2_viability::run_stage2;
use stage3_quality::run_stage3;
use stage4_rates::{dimension_union, run_stage4};
use stage5_effects::{compare_means, compare_proportions};
use stage6_report::{Stage6Input, build_report};

/// Runs align → viability/quality/rates → effects for one baseline/ablation pair.
pub fn run_comparison(
    baseline: &Cohort,
    ablation: &Cohort,
    profile: &DimensionProfile,
) -> ComparisonReport {
    let pair = align_cohorts(baseline, ablation);
    match pair.status {
        AlignmentStatus::Aligned => info!(
            "aligned {} vs {} on {} common cases",
            baseline.label, ablation.label, pair.common_cases
        ),
        AlignmentStatus::NoCommonCases => warn!(
            "no common case ids between {} ({} records) and {} ({} records); comparing unaligned cohorts",
            baseline.label,
            baseline.len(),
            ablation.label,
            ablation.len()
        ),
    }
    for (label, dropped) in [
        (&baseline.label, pair.duplicates_dropped[0]),
        (&ablation.label, pair.duplicates_dropped[1]),
    ] {
        if dropped > 0 {
            warn!("{label}: dropped {dropped} duplicate case ids during alignment (first kept)");
        }
    }

    let via_a = run_stage2(&pair.baseline, &profile.critical);
    let via_b = run_stage2(&pair.ablation, &profile.critical);
    let viability_comparison = compare_proportions(
        via_a.viable_count,
        via_a.n_records,
        via_b.viable_count,
        via_b.n_records,
        profile.wilson_z,
        profile.yates_correction,
    );

    let quality_a = run_stage3(&pair.baseline, &profile.quality);
    let quality_b = run_stage3(&pair.ablation, &profile.quality);
    let quality_comparison = compare_means(quality_a.summary, quality_b.summary);
    if quality_comparison.cohens_d.is_none() {
        debug!("cohen's d undefined for {} vs {}", baseline.label, ablation.label);
    }

    let dimensions = dimension_union(&pair.baseline, &pair.ablation);
    let rates_a = run_stage4(&pair.baseline, &dimensions);
    let rates_b = run_stage4(&pair.ablation, &dimensions);
    let rate_comparisons = rates_a
        .iter()
        .zip(&rates_b)
        .map(|(a, b)| {
            if a.rate.is_undefined() || b.rate.is_undefined() {
                debug!("{}: no applicable ratings in at least one cohort", a.dimension);
            }
            compare_proportions(
                a.pass_count,
                a.non_na_count,
                b.pass_count,
                b.non_na_count,
                profile.wilson_z,
                profile.yates_correction,
            )
        })
        .collect();

    build_report(Stage6Input {
        pair: &pair,
        profile,
        viability: [&via_a, &via_b],
        viability_comparison,
        quality: [&quality_a, &quality_b],
        quality_comparison,
        rates: [rates_a.as_slice(), rates_b.as_slice()],
        rate_comparisons,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
