use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::model::effect::{MeanComparison, ProportionComparison};
use crate::model::profile::DimensionProfile;
use crate::model::rates::DimensionRate;
use crate::pipeline::stage1_align::AlignedCohortPair;
use crate::pipeline::stage2_viability::ViabilitySummary;
use crate::pipeline::stage3_quality::Stage3Output;
use crate::pipeline::stage4_rates::pass_rate_delta_pp;
use crate::report::json::{render_batch_json, render_report_json};
use crate::report::text::render_report_text;
use crate::report::{
    AlignmentSummary, Breakdown, ComparisonReport, DimensionRow, QualitySection, ToolMeta,
    ViabilitySection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Both,
}

#[derive(Debug)]
pub struct Stage6Input<'a> {
    pub pair: &'a AlignedCohortPair,
    pub profile: &'a DimensionProfile,
    pub viability: [&'a ViabilitySummary; 2],
    pub viability_comparison: ProportionComparison,
    pub quality: [&'a Stage3Output; 2],
    pub quality_comparison: MeanComparison,
    pub rates: [&'a [DimensionRate]; 2],
    pub rate_comparisons: Vec<ProportionComparison>,
}

pub fn build_report(input: Stage6Input<'_>) -> ComparisonReport {
    let pair = input.pair;
    let dimensions = input.rates[0]
        .iter()
        .zip(input.rates[1])
        .zip(input.rate_comparisons)
        .map(|((a, b), comparison)| DimensionRow {
            dimension: a.dimension.clone(),
            baseline: a.clone(),
            ablation: b.clone(),
            baseline_pass_rate: a.pass_rate(),
            ablation_pass_rate: b.pass_rate(),
            delta_pp: pass_rate_delta_pp(a, b),
            breakdown_baseline: Breakdown::from_rate(a),
            breakdown_ablation: Breakdown::from_rate(b),
            comparison,
        })
        .collect();

    ComparisonReport {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        baseline_label: pair.baseline.label.clone(),
        ablation_label: pair.ablation.label.clone(),
        alignment: AlignmentSummary {
            status: pair.status,
            common_cases: pair.common_cases,
            baseline_records: pair.baseline.len(),
            ablation_records: pair.ablation.len(),
            duplicates_dropped_baseline: pair.duplicates_dropped[0],
            duplicates_dropped_ablation: pair.duplicates_dropped[1],
        },
        profile: input.profile.clone(),
        viability: ViabilitySection {
            baseline: input.viability[0].clone(),
            ablation: input.viability[1].clone(),
            comparison: input.viability_comparison,
        },
        quality: QualitySection {
            dimensions: input.profile.quality.clone(),
            unscored_baseline: input.quality[0].unscored,
            unscored_ablation: input.quality[1].unscored,
            comparison: input.quality_comparison,
        },
        dimensions,
    }
}

/// Writes `comparison_<ablation>.{json,txt}` per report, plus `comparisons.json` for batches.
pub fn write_reports(
    reports: &[ComparisonReport],
    out_dir: &Path,
    format: ReportFormat,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    let mut used_stems: HashSet<String> = HashSet::new();

    for report in reports {
        let stem = unique_stem(
            &format!("comparison_{}", file_safe(&report.ablation_label)),
            &mut used_stems,
        );
        if matches!(format, ReportFormat::Json | ReportFormat::Both) {
            let path = out_dir.join(format!("{stem}.json"));
            write_text(&path, &render_report_json(report)?)?;
            written.push(path);
        }
        if matches!(format, ReportFormat::Text | ReportFormat::Both) {
            let path = out_dir.join(format!("{stem}.txt"));
            write_text(&path, &render_report_text(report))?;
            written.push(path);
        }
    }

    if reports.len() > 1 && matches!(format, ReportFormat::Json | ReportFormat::Both) {
        let path = out_dir.join("comparisons.json");
        write_text(&path, &render_batch_json(reports)?)?;
        written.push(path);
    }

    Ok(written)
}

/// Suffixes `_2`, `_3`, ... onto stems already taken in this batch.
fn unique_stem(base: &str, used: &mut HashSet<String>) -> String {
    let mut stem = base.to_string();
    let mut n = 2usize;
    while !used.insert(stem.clone()) {
        stem = format!("{base}_{n}");
        n += 1;
    }
    stem
}

fn file_safe(label: &str) -> String {
    let s: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() { "ablation".to_string() } else { s }
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
