pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::effect::{MeanComparison, ProportionComparison};
use crate::model::profile::DimensionProfile;
use crate::model::rates::DimensionRate;
use crate::pipeline::stage1_align::AlignmentStatus;
use crate::pipeline::stage2_viability::ViabilitySummary;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentSummary {
    pub status: AlignmentStatus,
    pub common_cases: usize,
    pub baseline_records: usize,
    pub ablation_records: usize,
    pub duplicates_dropped_baseline: usize,
    pub duplicates_dropped_ablation: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViabilitySection {
    pub baseline: ViabilitySummary,
    pub ablation: ViabilitySummary,
    pub comparison: ProportionComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualitySection {
    pub dimensions: Vec<String>,
    pub unscored_baseline: usize,
    pub unscored_ablation: usize,
    pub comparison: MeanComparison,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Breakdown {
    pub pass_pct: f64,
    pub warn_pct: f64,
    pub fail_pct: f64,
}

impl Breakdown {
    pub fn from_rate(rate: &DimensionRate) -> Option<Self> {
        rate.breakdown_pct().map(|[pass_pct, warn_pct, fail_pct]| Breakdown {
            pass_pct,
            warn_pct,
            fail_pct,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionRow {
    pub dimension: String,
    pub baseline: DimensionRate,
    pub ablation: DimensionRate,
    pub baseline_pass_rate: f64,
    pub ablation_pass_rate: f64,
    /// Pass-rate delta with the zero-denominator convention applied.
    pub delta_pp: f64,
    pub breakdown_baseline: Option<Breakdown>,
    pub breakdown_ablation: Option<Breakdown>,
    pub comparison: ProportionComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub tool: ToolMeta,
    pub baseline_label: String,
    pub ablation_label: String,
    pub alignment: AlignmentSummary,
    pub profile: DimensionProfile,
    pub viability: ViabilitySection,
    pub quality: QualitySection,
    pub dimensions: Vec<DimensionRow>,
}

pub const UNDEFINED: &str = "undefined";

pub fn format_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(x) => format!("{:.prec$}", x, prec = precision),
        None => UNDEFINED.to_string(),
    }
}

pub fn format_signed_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(x) => format!("{:+.prec$}", x, prec = precision),
        None => UNDEFINED.to_string(),
    }
}

pub fn format_pct(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.1}%", x * 100.0),
        None => UNDEFINED.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
