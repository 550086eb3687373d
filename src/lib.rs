//! Cohort comparison and effect-size analysis for human-evaluation records.
//!
//! Two cohorts of PASS/WARN/FAIL/NA ratings (a baseline and an ablation) are
//! aligned on case id, then compared on viability, a 0-10 quality score, and
//! per-dimension pass rates. Comparisons report deltas, Cohen's h and d,
//! Wilson intervals, and a 2x2 chi-square test.
//!
//! ```ignore
//! use kira_cohortqc::model::profile::DimensionProfile;
//! use kira_cohortqc::pipeline::run_comparison;
//!
//! let report = run_comparison(&baseline, &ablation, &DimensionProfile::default_v1());
//! println!("{:?}", report.viability.comparison.delta_pp);
//! ```

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use model::profile::DimensionProfile;
pub use model::rating::Rating;
pub use model::record::{Cohort, EvaluationRecord};
pub use pipeline::run_comparison;
