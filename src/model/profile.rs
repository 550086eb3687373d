use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WILSON_Z: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionProfile {
    pub critical: Vec<String>,
    pub quality: Vec<String>,
    pub wilson_z: f64,
    pub yates_correction: bool,
}

/// Partial override read from a JSON config file; absent fields keep defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileOverride {
    critical: Option<Vec<String>>,
    quality: Option<Vec<String>>,
    wilson_z: Option<f64>,
    yates_correction: Option<bool>,
}

impl DimensionProfile {
    pub fn default_v1() -> Self {
        Self {
            critical: vec!["boot".to_string(), "prompt-adherence".to_string()],
            quality: vec![
                "boot".to_string(),
                "prompt-adherence".to_string(),
                "create".to_string(),
                "view-edit".to_string(),
                "interaction-sweep".to_string(),
                "performance-threshold".to_string(),
            ],
            wilson_z: DEFAULT_WILSON_Z,
            yates_correction: true,
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let over: ProfileOverride = serde_json::from_str(text)?;
        let mut profile = Self::default_v1();
        if let Some(critical) = over.critical {
            profile.critical = normalize_all(&critical);
        }
        if let Some(quality) = over.quality {
            profile.quality = normalize_all(&quality);
        }
        if let Some(z) = over.wilson_z {
            profile.wilson_z = z;
        }
        if let Some(yates) = over.yates_correction {
            profile.yates_correction = yates;
        }
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.critical.is_empty() {
            return Err(ConfigError::Invalid(
                "critical dimension set is empty".to_string(),
            ));
        }
        if self.quality.is_empty() {
            return Err(ConfigError::Invalid(
                "quality dimension list is empty".to_string(),
            ));
        }
        if !(self.wilson_z.is_finite() && self.wilson_z > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "wilson_z must be a positive finite number, got {}",
                self.wilson_z
            )));
        }
        Ok(())
    }
}

/// Canonical dimension label: trimmed, lowercased, '/' and Unicode hyphen variants folded to '-'.
pub fn normalize_dimension(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2212}' => '-',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

fn normalize_all(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let n = normalize_dimension(name);
        if !out.contains(&n) {
            out.push(n);
        }
    }
    out
}
