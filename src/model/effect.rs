use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Cohen's conventional bands, shared by h and d.
    pub fn classify(effect: f64) -> Self {
        let e = effect.abs();
        if e < 0.2 {
            EffectMagnitude::Negligible
        } else if e < 0.5 {
            EffectMagnitude::Small
        } else if e < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WilsonInterval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub p_value: f64,
    pub yates_corrected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0.0 when n < 2.
    pub std_dev: f64,
}

/// Two-proportion comparison: baseline (A) against ablation (B).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionComparison {
    pub delta_pp: Option<f64>,
    /// Absolute Cohen's h.
    pub cohens_h: Option<f64>,
    pub magnitude: Option<EffectMagnitude>,
    pub ci_baseline: Option<WilsonInterval>,
    pub ci_ablation: Option<WilsonInterval>,
    pub chi_square: Option<ChiSquareResult>,
}

/// Two-mean comparison: baseline (A) against ablation (B).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanComparison {
    pub baseline: Option<SampleSummary>,
    pub ablation: Option<SampleSummary>,
    /// `mean_B - mean_A`.
    pub delta_absolute: Option<f64>,
    /// `(mean_A - mean_B) / s_pooled`.
    pub cohens_d: Option<f64>,
    pub magnitude: Option<EffectMagnitude>,
}
