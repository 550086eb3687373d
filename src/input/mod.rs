use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::InputError;
use crate::model::profile::normalize_dimension;
use crate::model::rating::Rating;
use crate::model::record::{Cohort, EvaluationRecord};

pub const DEFAULT_ID_FIELD: &str = "case_id";

#[derive(Debug, Clone)]
pub struct LoadedCohort {
    pub cohort: Cohort,
    pub path: PathBuf,
    pub rows_skipped: usize,
    pub duplicates_dropped: usize,
    pub malformed_ratings: usize,
    /// Raw keys dropped because another key in the same row normalised to the same dimension.
    pub label_collisions: usize,
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Loads a cohort from a JSON array of rows, or JSON Lines for `.jsonl[.gz]` files.
pub fn load_cohort(
    path: &Path,
    label: Option<&str>,
    id_field: &str,
) -> Result<LoadedCohort, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let rows = if is_json_lines(path) {
        read_json_lines(&mut reader, path)?
    } else {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        parse_json_array(&text, path)?
    };

    let label = label
        .map(str::to_string)
        .unwrap_or_else(|| label_from_path(path));
    let loaded = rows_to_cohort(rows, &label, id_field, path)?;
    info!(
        "loaded cohort {} from {}: {} records",
        loaded.cohort.label,
        path.display(),
        loaded.cohort.len()
    );
    Ok(loaded)
}

pub fn parse_json_array(text: &str, path: &Path) -> Result<Vec<Value>, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(rows) => Ok(rows),
        _ => Err(InputError::Invalid {
            path: path.to_path_buf(),
            msg: "expected a JSON array of records".to_string(),
        }),
    }
}

fn read_json_lines(reader: &mut dyn BufRead, path: &Path) -> Result<Vec<Value>, InputError> {
    let mut rows = Vec::new();
    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }
        let value = serde_json::from_str(line).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(value);
    }
    Ok(rows)
}

/// Turns raw rows into a cohort. Rows without an id are skipped; repeated ids keep the first row.
pub fn rows_to_cohort(
    rows: Vec<Value>,
    label: &str,
    id_field: &str,
    path: &Path,
) -> Result<LoadedCohort, InputError> {
    if rows.is_empty() {
        return Err(InputError::Invalid {
            path: path.to_path_buf(),
            msg: "cohort file has no records".to_string(),
        });
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows_skipped = 0usize;
    let mut duplicates_dropped = 0usize;
    let mut malformed_ratings = 0usize;
    let mut label_collisions = 0usize;

    for (idx, row) in rows.into_iter().enumerate() {
        let Value::Object(fields) = row else {
            warn!("{}: row {} is not an object; skipping", path.display(), idx + 1);
            rows_skipped += 1;
            continue;
        };
        let Some(case_id) = extract_case_id(&fields, id_field) else {
            warn!(
                "{}: row {} has no usable {}; skipping",
                path.display(),
                idx + 1,
                id_field
            );
            rows_skipped += 1;
            continue;
        };
        if !seen.insert(case_id.clone()) {
            warn!(
                "{}: duplicate case id; keeping first (row {}, case {})",
                path.display(),
                idx + 1,
                case_id
            );
            duplicates_dropped += 1;
            continue;
        }

        let mut record = EvaluationRecord::new(case_id);
        for (key, value) in &fields {
            if key == id_field {
                continue;
            }
            let dimension = normalize_dimension(key);
            if record.ratings.contains_key(&dimension) {
                warn!(
                    "{}: case {} has several columns for dimension {}; keeping first ({} ignored)",
                    path.display(),
                    record.case_id,
                    dimension,
                    key
                );
                label_collisions += 1;
                continue;
            }
            let (rating, malformed) = coerce_rating(value);
            if malformed {
                malformed_ratings += 1;
            }
            record.ratings.insert(dimension, rating);
        }
        records.push(record);
    }

    if malformed_ratings > 0 {
        warn!(
            "{}: {} rating values outside PASS/WARN/FAIL/NA treated as NA",
            path.display(),
            malformed_ratings
        );
    }

    Ok(LoadedCohort {
        cohort: Cohort::new(label, records),
        path: path.to_path_buf(),
        rows_skipped,
        duplicates_dropped,
        malformed_ratings,
        label_collisions,
    })
}

fn extract_case_id(fields: &Map<String, Value>, id_field: &str) -> Option<String> {
    match fields.get(id_field)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns the rating and whether the raw value was malformed.
fn coerce_rating(value: &Value) -> (Rating, bool) {
    match value {
        Value::Null => (Rating::Na, false),
        Value::String(s) if s.trim().is_empty() => (Rating::Na, false),
        Value::String(s) => match Rating::parse_strict(s) {
            Some(r) => (r, false),
            None => (Rating::Na, true),
        },
        _ => (Rating::Na, true),
    }
}

fn is_json_lines(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".jsonl") || name.ends_with(".jsonl.gz")
}

fn label_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut stem = name.as_str();
    for suffix in [".gz", ".jsonl", ".json"] {
        if let Some(s) = stem.strip_suffix(suffix) {
            stem = s;
        }
    }
    if stem.is_empty() {
        "cohort".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
