use serde::Serialize;

use crate::model::rates::RateValue;
use crate::model::rating::Rating;
use crate::model::record::{Cohort, EvaluationRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViabilitySummary {
    pub n_records: usize,
    pub viable_count: usize,
    pub non_viable_count: usize,
    pub rate: RateValue,
}

/// A record is viable unless a critical dimension is FAIL. Missing dimensions never gate.
pub fn is_viable(record: &EvaluationRecord, critical: &[String]) -> bool {
    !critical
        .iter()
        .any(|dim| record.ratings.get(dim) == Some(&Rating::Fail))
}

pub fn viability_flags(cohort: &Cohort, critical: &[String]) -> Vec<bool> {
    cohort
        .records
        .iter()
        .map(|r| is_viable(r, critical))
        .collect()
}

pub fn run_stage2(cohort: &Cohort, critical: &[String]) -> ViabilitySummary {
    let flags = viability_flags(cohort, critical);
    let viable_count = flags.iter().filter(|&&v| v).count();
    ViabilitySummary {
        n_records: flags.len(),
        viable_count,
        non_viable_count: flags.len() - viable_count,
        rate: RateValue::from_counts(viable_count, flags.len()),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_viability.rs"]
mod tests;
