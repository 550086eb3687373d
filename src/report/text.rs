use crate::model::effect::{ChiSquareResult, EffectMagnitude, WilsonInterval};
use crate::pipeline::stage1_align::AlignmentStatus;
use crate::report::{
    Breakdown, ComparisonReport, DimensionRow, UNDEFINED, format_opt, format_pct,
    format_signed_opt,
};

pub fn render_report_text(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let a = &report.baseline_label;
    let b = &report.ablation_label;

    out.push_str(&format!("Cohort Comparison Report: {} vs {}\n", a, b));
    out.push_str("=============================================\n\n");

    out.push_str("1. Alignment\n");
    match report.alignment.status {
        AlignmentStatus::Aligned => out.push_str(&format!(
            "Aligned on {} common cases ({} baseline records, {} ablation records)\n",
            report.alignment.common_cases,
            report.alignment.baseline_records,
            report.alignment.ablation_records
        )),
        AlignmentStatus::NoCommonCases => out.push_str(&format!(
            "WARNING: no common case ids; comparing unaligned cohorts ({} vs {} records)\n",
            report.alignment.baseline_records, report.alignment.ablation_records
        )),
    }
    let dups = report.alignment.duplicates_dropped_baseline
        + report.alignment.duplicates_dropped_ablation;
    if dups > 0 {
        out.push_str(&format!(
            "Duplicate case ids dropped (first kept): baseline={}, ablation={}\n",
            report.alignment.duplicates_dropped_baseline,
            report.alignment.duplicates_dropped_ablation
        ));
    }
    out.push('\n');

    out.push_str("2. Viability\n");
    let via = &report.viability;
    out.push_str(&format!(
        "Critical dimensions: {}\n",
        report.profile.critical.join(", ")
    ));
    out.push_str(&format!(
        "{}: {}/{} viable ({}) CI {}\n",
        a,
        via.baseline.viable_count,
        via.baseline.n_records,
        format_pct(via.baseline.rate.defined()),
        format_interval(via.comparison.ci_baseline)
    ));
    out.push_str(&format!(
        "{}: {}/{} viable ({}) CI {}\n",
        b,
        via.ablation.viable_count,
        via.ablation.n_records,
        format_pct(via.ablation.rate.defined()),
        format_interval(via.comparison.ci_ablation)
    ));
    out.push_str(&format!(
        "Delta: {} pp\n",
        format_signed_opt(via.comparison.delta_pp, 1)
    ));
    out.push_str(&format!(
        "Cohen's h: {}\n",
        format_effect(via.comparison.cohens_h, via.comparison.magnitude)
    ));
    out.push_str(&format!(
        "Chi-square (for reference): {}\n\n",
        format_chi(via.comparison.chi_square.as_ref())
    ));

    out.push_str("3. Quality score (0-10)\n");
    let q = &report.quality.comparison;
    out.push_str(&format!(
        "{}: mean {} (sd {}, n={}, unscored={})\n",
        a,
        format_opt(q.baseline.map(|s| s.mean), 2),
        format_opt(q.baseline.map(|s| s.std_dev), 2),
        q.baseline.map(|s| s.n).unwrap_or(0),
        report.quality.unscored_baseline
    ));
    out.push_str(&format!(
        "{}: mean {} (sd {}, n={}, unscored={})\n",
        b,
        format_opt(q.ablation.map(|s| s.mean), 2),
        format_opt(q.ablation.map(|s| s.std_dev), 2),
        q.ablation.map(|s| s.n).unwrap_or(0),
        report.quality.unscored_ablation
    ));
    out.push_str(&format!("Delta: {}\n", format_signed_opt(q.delta_absolute, 2)));
    out.push_str(&format!(
        "Cohen's d: {}\n\n",
        format_effect(q.cohens_d, q.magnitude)
    ));

    out.push_str("4. Pass rate by dimension\n");
    out.push_str(&format!(
        "{:<28} {:>16} {:>16} {:>9} {:>22}\n",
        "dimension", a, b, "delta_pp", "cohens_h"
    ));
    for row in &report.dimensions {
        out.push_str(&render_rate_row(row));
    }
    out.push('\n');

    out.push_str("5. PASS/WARN/FAIL breakdown\n");
    for row in &report.dimensions {
        out.push_str(&format!(
            "{:<28} {}: {}  {}: {}\n",
            row.dimension,
            a,
            format_breakdown(row.breakdown_baseline),
            b,
            format_breakdown(row.breakdown_ablation)
        ));
    }
    out.push('\n');

    out.push_str("6. Significance (for reference)\n");
    for row in &report.dimensions {
        out.push_str(&format!(
            "{:<28} {}  CI {}: {}  CI {}: {}\n",
            row.dimension,
            format_chi(row.comparison.chi_square.as_ref()),
            a,
            format_interval(row.comparison.ci_baseline),
            b,
            format_interval(row.comparison.ci_ablation)
        ));
    }
    out.push_str(
        "Sample sizes are small; read effect sizes and deltas first, p-values are descriptive.\n",
    );

    out
}

fn render_rate_row(row: &DimensionRow) -> String {
    format!(
        "{:<28} {:>16} {:>16} {:>9} {:>22}\n",
        row.dimension,
        format_rate_cell(row.baseline.pass_count, row.baseline.non_na_count),
        format_rate_cell(row.ablation.pass_count, row.ablation.non_na_count),
        format!("{:+.1}", row.delta_pp),
        format_effect(row.comparison.cohens_h, row.comparison.magnitude)
    )
}

fn format_rate_cell(pass: usize, total: usize) -> String {
    if total == 0 {
        return "no data".to_string();
    }
    format!(
        "{:.1}% ({}/{})",
        pass as f64 / total as f64 * 100.0,
        pass,
        total
    )
}

fn format_effect(value: Option<f64>, magnitude: Option<EffectMagnitude>) -> String {
    match (value, magnitude) {
        (Some(v), Some(m)) => format!("{:.3} ({})", v, m.as_str()),
        (Some(v), None) => format!("{:.3}", v),
        _ => UNDEFINED.to_string(),
    }
}

fn format_interval(ci: Option<WilsonInterval>) -> String {
    match ci {
        Some(ci) => format!("[{:.3}, {:.3}]", ci.lower, ci.upper),
        None => UNDEFINED.to_string(),
    }
}

fn format_chi(chi: Option<&ChiSquareResult>) -> String {
    match chi {
        Some(c) => format!("chi2={:.3}, p={:.4}", c.statistic, c.p_value),
        None => format!("chi2={}", UNDEFINED),
    }
}

fn format_breakdown(b: Option<Breakdown>) -> String {
    match b {
        Some(b) => format!(
            "PASS {:.1}% / WARN {:.1}% / FAIL {:.1}%",
            b.pass_pct, b.warn_pct, b.fail_pct
        ),
        None => "no data".to_string(),
    }
}
