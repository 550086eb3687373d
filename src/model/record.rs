use std::collections::BTreeMap;

use crate::model::rating::Rating;

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    pub case_id: String,
    pub ratings: BTreeMap<String, Rating>,
}

impl EvaluationRecord {
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            ratings: BTreeMap::new(),
        }
    }

    pub fn with_rating(mut self, dimension: &str, rating: Rating) -> Self {
        self.ratings.insert(dimension.to_string(), rating);
        self
    }

    /// Absent dimensions read as NA.
    pub fn rating(&self, dimension: &str) -> Rating {
        self.ratings.get(dimension).copied().unwrap_or(Rating::Na)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub label: String,
    pub records: Vec<EvaluationRecord>,
}

impl Cohort {
    pub fn new(label: impl Into<String>, records: Vec<EvaluationRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted union of dimension names seen in any record.
    pub fn dimension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .flat_map(|r| r.ratings.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
