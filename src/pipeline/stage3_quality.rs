use crate::model::effect::SampleSummary;
use crate::model::record::{Cohort, EvaluationRecord};

#[derive(Debug, Clone)]
pub struct Stage3Output {
    /// Per-record scores in cohort order; `None` when no designated dimension applied.
    pub scores: Vec<Option<f64>>,
    pub summary: Option<SampleSummary>,
    pub unscored: usize,
}

/// Mean of PASS=1/WARN=0.5/FAIL=0 over applicable designated dimensions, scaled to [0, 10].
pub fn quality_score(record: &EvaluationRecord, dimensions: &[String]) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for dim in dimensions {
        if let Some(w) = record.rating(dim).quality_weight() {
            sum += w;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some(sum / count as f64 * 10.0)
}

/// Mean and sample standard deviation over the defined values only.
pub fn summarize(values: &[Option<f64>]) -> Option<SampleSummary> {
    let defined: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    if defined.is_empty() {
        return None;
    }
    let n = defined.len();
    let mean = defined.iter().sum::<f64>() / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        let ss = defined.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (ss / (n - 1) as f64).sqrt()
    };
    Some(SampleSummary { n, mean, std_dev })
}

pub fn run_stage3(cohort: &Cohort, dimensions: &[String]) -> Stage3Output {
    let scores: Vec<Option<f64>> = cohort
        .records
        .iter()
        .map(|r| quality_score(r, dimensions))
        .collect();
    let unscored = scores.iter().filter(|s| s.is_none()).count();
    let summary = summarize(&scores);
    Stage3Output {
        scores,
        summary,
        unscored,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_quality.rs"]
mod tests;
