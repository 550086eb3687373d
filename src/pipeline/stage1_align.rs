use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::record::{Cohort, EvaluationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    Aligned,
    /// Empty intersection; both cohorts are passed through unaligned.
    NoCommonCases,
}

#[derive(Debug, Clone)]
pub struct AlignedCohortPair {
    pub baseline: Cohort,
    pub ablation: Cohort,
    pub status: AlignmentStatus,
    pub common_cases: usize,
    pub duplicates_dropped: [usize; 2],
}

impl AlignedCohortPair {
    pub fn is_aligned(&self) -> bool {
        self.status == AlignmentStatus::Aligned
    }
}

pub fn align_cohorts(baseline: &Cohort, ablation: &Cohort) -> AlignedCohortPair {
    let keys_a: BTreeSet<&str> = baseline
        .records
        .iter()
        .map(|r| r.case_id.as_str())
        .collect();
    let keys_b: BTreeSet<&str> = ablation
        .records
        .iter()
        .map(|r| r.case_id.as_str())
        .collect();
    let common: BTreeSet<&str> = keys_a.intersection(&keys_b).copied().collect();

    if common.is_empty() {
        return AlignedCohortPair {
            baseline: baseline.clone(),
            ablation: ablation.clone(),
            status: AlignmentStatus::NoCommonCases,
            common_cases: 0,
            duplicates_dropped: [0, 0],
        };
    }

    let (records_a, dup_a) = restrict_sorted(&baseline.records, &common);
    let (records_b, dup_b) = restrict_sorted(&ablation.records, &common);

    AlignedCohortPair {
        baseline: Cohort::new(baseline.label.clone(), records_a),
        ablation: Cohort::new(ablation.label.clone(), records_b),
        status: AlignmentStatus::Aligned,
        common_cases: common.len(),
        duplicates_dropped: [dup_a, dup_b],
    }
}

/// Keeps the first record per common case id, ordered by case id.
fn restrict_sorted(
    records: &[EvaluationRecord],
    common: &BTreeSet<&str>,
) -> (Vec<EvaluationRecord>, usize) {
    let mut by_id: BTreeMap<&str, &EvaluationRecord> = BTreeMap::new();
    let mut duplicates = 0usize;
    for record in records {
        let id = record.case_id.as_str();
        if !common.contains(id) {
            continue;
        }
        if by_id.contains_key(id) {
            duplicates += 1;
            continue;
        }
        by_id.insert(id, record);
    }
    (by_id.into_values().cloned().collect(), duplicates)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_align.rs"]
mod tests;
