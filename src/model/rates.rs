use serde::Serialize;

/// Pass rate with the zero-denominator case kept distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RateValue {
    Rate(f64),
    Undefined,
}

impl RateValue {
    pub fn from_counts(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            RateValue::Undefined
        } else {
            RateValue::Rate(numerator as f64 / denominator as f64)
        }
    }

    /// Numeric view; `Undefined` reads as 0.0.
    pub fn or_zero(self) -> f64 {
        match self {
            RateValue::Rate(v) => v,
            RateValue::Undefined => 0.0,
        }
    }

    pub fn defined(self) -> Option<f64> {
        match self {
            RateValue::Rate(v) => Some(v),
            RateValue::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, RateValue::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionRate {
    pub dimension: String,
    pub non_na_count: usize,
    pub pass_count: usize,
    pub warn_count: usize,
    pub fail_count: usize,
    pub rate: RateValue,
}

impl DimensionRate {
    pub fn pass_rate(&self) -> f64 {
        self.rate.or_zero()
    }

    pub fn total(&self) -> usize {
        self.non_na_count
    }

    pub fn non_pass_count(&self) -> usize {
        self.non_na_count.saturating_sub(self.pass_count)
    }

    /// PASS/WARN/FAIL shares of `total`, in percent. `None` when nothing is applicable.
    pub fn breakdown_pct(&self) -> Option<[f64; 3]> {
        if self.non_na_count == 0 {
            return None;
        }
        let t = self.non_na_count as f64;
        Some([
            self.pass_count as f64 / t * 100.0,
            self.warn_count as f64 / t * 100.0,
            self.fail_count as f64 / t * 100.0,
        ])
    }
}
