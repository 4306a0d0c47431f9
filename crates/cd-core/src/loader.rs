//! Dataset loading.
//!
//! The source datasets are JSON arrays of per-minute records:
//!
//! ```json
//! [
//!   { "id": "m1", "time": 1, "act": 54.0, "temp": 36.8,
//!     "sex": "male", "estrus": false },
//!   ...
//! ]
//! ```
//!
//! A record carries one or both measured quantities (`act`, `temp`); the
//! caller selects which becomes the observation value. Records missing the
//! selected field are skipped with a debug log. The sex category is taken
//! from the record here, at ingestion, so the engine never derives it from
//! id strings.

use cd_common::{Error, Observation, Result, Sex, ValueField};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One raw record as it appears in the dataset files.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    id: String,
    time: u32,
    #[serde(default)]
    act: Option<f64>,
    #[serde(default)]
    temp: Option<f64>,
    sex: Sex,
    #[serde(default)]
    estrus: Option<bool>,
}

impl RawRecord {
    fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::Activity => self.act,
            ValueField::Temperature => self.temp,
        }
    }
}

/// Load a dataset file, selecting `field` as the observation value.
pub fn load_path(path: &Path, field: ValueField) -> Result<Vec<Observation>> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::io(path.display().to_string(), source))?;
    load_str(&content, field)
}

/// Parse a dataset from a JSON string, selecting `field` as the value.
///
/// An empty JSON array is a valid empty dataset. A non-empty array in
/// which no record carries the selected field is an error: it almost
/// always means the wrong `--field` for the file.
pub fn load_str(json: &str, field: ValueField) -> Result<Vec<Observation>> {
    let records: Vec<RawRecord> = serde_json::from_str(json)?;
    let total = records.len();

    let mut observations = Vec::with_capacity(total);
    let mut skipped = 0_usize;
    for record in records {
        let Some(value) = record.value(field) else {
            skipped += 1;
            debug!(id = %record.id, time = record.time, field = %field,
                "record missing selected field, skipped");
            continue;
        };
        observations.push(Observation {
            entity: record.id.into(),
            time: record.time,
            value,
            sex: record.sex,
            estrus: record.estrus,
        });
    }

    if observations.is_empty() && total > 0 {
        return Err(Error::EmptyDataset {
            field: field.to_string(),
        });
    }
    if skipped > 0 {
        debug!(skipped, total, "dataset loaded with skipped records");
    }
    Ok(observations)
}
