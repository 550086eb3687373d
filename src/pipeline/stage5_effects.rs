use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::model::effect::{
    ChiSquareResult, EffectMagnitude, MeanComparison, ProportionComparison, SampleSummary,
    WilsonInterval,
};
use crate::model::rates::RateValue;

/// Percentage-point change from baseline to ablation.
pub fn delta_pp(rate_baseline: f64, rate_ablation: f64) -> f64 {
    (rate_ablation - rate_baseline) * 100.0
}

/// Signed Cohen's h, `2 * (asin(sqrt(p1)) - asin(sqrt(p2)))`. `None` outside [0, 1].
pub fn cohens_h(p1: f64, p2: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&p1) || !(0.0..=1.0).contains(&p2) {
        return None;
    }
    Some(2.0 * (p1.sqrt().asin() - p2.sqrt().asin()))
}

pub fn pooled_std(a: &SampleSummary, b: &SampleSummary) -> Option<f64> {
    let n_total = a.n + b.n;
    if n_total <= 2 {
        return None;
    }
    let ss = (a.n.saturating_sub(1)) as f64 * a.std_dev.powi(2)
        + (b.n.saturating_sub(1)) as f64 * b.std_dev.powi(2);
    let s = (ss / (n_total - 2) as f64).sqrt();
    if s.is_finite() { Some(s) } else { None }
}

/// Signed Cohen's d, `(m1 - m2) / s_pooled`. `None` when the pooled deviation is zero or undefined.
pub fn cohens_d(a: &SampleSummary, b: &SampleSummary) -> Option<f64> {
    let s = pooled_std(a, b)?;
    if s == 0.0 {
        return None;
    }
    Some((a.mean - b.mean) / s)
}

/// Wilson score interval for proportion `p` over `n` trials. `None` for `n == 0`.
pub fn wilson_interval(p: f64, n: usize, z: f64) -> Option<WilsonInterval> {
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let n = n as f64;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let offset = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    Some(WilsonInterval {
        lower: (center - offset).clamp(0.0, 1.0),
        upper: (center + offset).clamp(0.0, 1.0),
    })
}

/// Chi-square test of independence on `[[a0, a1], [b0, b1]]` with one degree of freedom.
///
/// With `yates`, each observed count moves toward its expectation by at most 0.5.
/// Undefined when any row or column sums to zero.
pub fn chi_square_2x2(table: [[usize; 2]; 2], yates: bool) -> Option<ChiSquareResult> {
    let obs = table.map(|row| row.map(|v| v as f64));
    let rows = [obs[0][0] + obs[0][1], obs[1][0] + obs[1][1]];
    let cols = [obs[0][0] + obs[1][0], obs[0][1] + obs[1][1]];
    let total = rows[0] + rows[1];
    if rows.contains(&0.0) || cols.contains(&0.0) {
        return None;
    }

    let mut statistic = 0.0;
    for i in 0..2 {
        for j in 0..2 {
            let expected = rows[i] * cols[j] / total;
            let mut observed = obs[i][j];
            if yates {
                let diff = expected - observed;
                observed += diff.signum() * diff.abs().min(0.5);
            }
            statistic += (observed - expected).powi(2) / expected;
        }
    }

    let dist = ChiSquared::new(1.0).ok()?;
    Some(ChiSquareResult {
        statistic,
        p_value: dist.sf(statistic).clamp(0.0, 1.0),
        yates_corrected: yates,
    })
}

pub fn compare_proportions(
    successes_baseline: usize,
    n_baseline: usize,
    successes_ablation: usize,
    n_ablation: usize,
    z: f64,
    yates: bool,
) -> ProportionComparison {
    let rate_a = proportion(successes_baseline, n_baseline);
    let rate_b = proportion(successes_ablation, n_ablation);

    let (delta, h) = match (rate_a, rate_b) {
        (Some(a), Some(b)) => (Some(delta_pp(a, b)), cohens_h(a, b).map(f64::abs)),
        _ => (None, None),
    };

    ProportionComparison {
        delta_pp: delta,
        cohens_h: h,
        magnitude: h.map(EffectMagnitude::classify),
        ci_baseline: rate_a.and_then(|p| wilson_interval(p, n_baseline, z)),
        ci_ablation: rate_b.and_then(|p| wilson_interval(p, n_ablation, z)),
        chi_square: n_baseline
            .checked_sub(successes_baseline)
            .zip(n_ablation.checked_sub(successes_ablation))
            .and_then(|(other_a, other_b)| {
                chi_square_2x2(
                    [
                        [successes_baseline, other_a],
                        [successes_ablation, other_b],
                    ],
                    yates,
                )
            }),
    }
}

/// Observed proportion; `None` for zero trials or more successes than trials.
fn proportion(successes: usize, n: usize) -> Option<f64> {
    if successes > n {
        return None;
    }
    RateValue::from_counts(successes, n).defined()
}

pub fn compare_means(
    baseline: Option<SampleSummary>,
    ablation: Option<SampleSummary>,
) -> MeanComparison {
    let (delta, d) = match (&baseline, &ablation) {
        (Some(a), Some(b)) => (Some(b.mean - a.mean), cohens_d(a, b)),
        _ => (None, None),
    };
    MeanComparison {
        baseline,
        ablation,
        delta_absolute: delta,
        cohens_d: d,
        magnitude: d.map(EffectMagnitude::classify),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_effects.rs"]
mod tests;
