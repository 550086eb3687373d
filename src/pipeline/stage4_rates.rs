use crate::model::rates::{DimensionRate, RateValue};
use crate::model::rating::Rating;
use crate::model::record::Cohort;

pub fn dimension_rate(cohort: &Cohort, dimension: &str) -> DimensionRate {
    let mut pass_count = 0usize;
    let mut warn_count = 0usize;
    let mut fail_count = 0usize;
    for record in &cohort.records {
        match record.rating(dimension) {
            Rating::Pass => pass_count += 1,
            Rating::Warn => warn_count += 1,
            Rating::Fail => fail_count += 1,
            Rating::Na => {}
        }
    }
    let non_na_count = pass_count + warn_count + fail_count;
    DimensionRate {
        dimension: dimension.to_string(),
        non_na_count,
        pass_count,
        warn_count,
        fail_count,
        rate: RateValue::from_counts(pass_count, non_na_count),
    }
}

/// `(rate_B - rate_A) * 100`, numeric rates with the zero convention.
pub fn pass_rate_delta_pp(baseline: &DimensionRate, ablation: &DimensionRate) -> f64 {
    (ablation.pass_rate() - baseline.pass_rate()) * 100.0
}

/// Sorted union of dimension names across both cohorts.
pub fn dimension_union(a: &Cohort, b: &Cohort) -> Vec<String> {
    let mut names = a.dimension_names();
    names.extend(b.dimension_names());
    names.sort();
    names.dedup();
    names
}

pub fn run_stage4(cohort: &Cohort, dimensions: &[String]) -> Vec<DimensionRate> {
    dimensions
        .iter()
        .map(|d| dimension_rate(cohort, d))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rates.rs"]
mod tests;
