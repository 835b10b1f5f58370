//! Read-only dataset store.
//!
//! Loads the review CSV once at startup, cleans and types every row, and
//! precomputes the ordered condition and drug sets. Nothing mutates the
//! store after construction; share it as `Arc<DatasetStore>`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::age::{parse_age, AgeBucket};
use crate::error::{DataLoadError, Result};
use crate::record::{ReviewRecord, Sex};

/// Columns the dataset must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Age", "Drug", "Condition", "Sex", "Satisfaction", "Reviews"];

/// How the raw bytes were decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

/// Row accounting from the cleaning pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing_condition: usize,
    pub dropped_bad_satisfaction: usize,
    /// Rows kept with a non-empty `Age` cell that did not parse as a number.
    pub ages_coerced: usize,
    pub encoding: TextEncoding,
}

#[derive(Debug, Clone)]
pub struct DatasetStore {
    records: Vec<ReviewRecord>,
    /// Distinct conditions in encounter order
    conditions: Vec<String>,
    /// Distinct drugs in encounter order, across all conditions
    drugs: Vec<String>,
    /// condition -> distinct drugs in encounter order
    drugs_by_condition: HashMap<String, Vec<String>>,
    report: LoadReport,
}

/// Decode dataset bytes. Valid UTF-8 is used as is; anything else is read
/// as Latin-1, where every byte maps to the code point of the same value.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), TextEncoding::Utf8),
        Err(_) => (
            Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Latin1,
        ),
    }
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    age: usize,
    drug: usize,
    condition: usize,
    sex: usize,
    satisfaction: usize,
    reviews: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        // All present, checked above
        let idx = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            age: idx("Age"),
            drug: idx("Drug"),
            condition: idx("Condition"),
            sex: idx("Sex"),
            satisfaction: idx("Satisfaction"),
            reviews: idx("Reviews"),
        })
    }
}

impl DatasetStore {
    /// Load the dataset from a CSV file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading dataset from {:?}", path);

        let bytes = tokio::fs::read(path).await.map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_bytes(&bytes)?;
        info!(
            "Loaded {} reviews ({} conditions, {} drugs) from {:?}",
            store.len(),
            store.conditions.len(),
            store.drugs.len(),
            path
        );
        Ok(store)
    }

    /// Parse a dataset from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|source| DataLoadError::Io {
            path: "<reader>".into(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a dataset from raw CSV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (text, encoding) = decode_text(bytes);
        if encoding == TextEncoding::Latin1 {
            debug!("Dataset is not valid UTF-8, decoded as Latin-1");
        }
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns = ColumnIndex::from_headers(reader.headers()?)?;
        let mut report = LoadReport { encoding, ..Default::default() };
        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            report.rows_read += 1;
            let cell = |i: usize| row.get(i).unwrap_or("");

            let condition = cell(columns.condition).trim();
            if condition.is_empty() {
                report.dropped_missing_condition += 1;
                continue;
            }

            let satisfaction = match cell(columns.satisfaction).trim().parse::<f64>() {
                Ok(s) if s.is_finite() => s,
                _ => {
                    debug!(row = report.rows_read, "Dropping row with non-numeric satisfaction");
                    report.dropped_bad_satisfaction += 1;
                    continue;
                }
            };

            let raw_age = cell(columns.age);
            let age = parse_age(raw_age);
            if age.is_none() && !raw_age.trim().is_empty() {
                report.ages_coerced += 1;
            }

            records.push(ReviewRecord::new(
                condition,
                cell(columns.drug).trim(),
                Sex::parse(cell(columns.sex)),
                age,
                satisfaction,
                cell(columns.reviews),
            ));
        }

        let dropped = report.dropped_missing_condition + report.dropped_bad_satisfaction;
        if dropped > 0 {
            warn!(
                missing_condition = report.dropped_missing_condition,
                bad_satisfaction = report.dropped_bad_satisfaction,
                "Dropped {} of {} dataset rows during cleaning",
                dropped,
                report.rows_read
            );
        }

        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut store = Self::from_records(records);
        report.rows_kept = store.records.len();
        store.report = report;
        Ok(store)
    }

    /// Build a store from already-typed records, keeping their order.
    pub fn from_records(records: Vec<ReviewRecord>) -> Self {
        let mut conditions = Vec::new();
        let mut drugs = Vec::new();
        let mut drugs_by_condition: HashMap<String, Vec<String>> = HashMap::new();

        let mut seen_conditions = HashSet::new();
        let mut seen_drugs = HashSet::new();
        let mut seen_pairs = HashSet::new();

        for r in &records {
            if seen_conditions.insert(r.condition.as_str()) {
                conditions.push(r.condition.clone());
            }
            if seen_drugs.insert(r.drug.as_str()) {
                drugs.push(r.drug.clone());
            }
            if seen_pairs.insert((r.condition.as_str(), r.drug.as_str())) {
                drugs_by_condition
                    .entry(r.condition.clone())
                    .or_default()
                    .push(r.drug.clone());
            }
        }

        let report = LoadReport {
            rows_read: records.len(),
            rows_kept: records.len(),
            ..Default::default()
        };

        Self { records, conditions, drugs, drugs_by_condition, report }
    }

    /// Distinct conditions in encounter order. The first is the default selection.
    pub fn all_conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Distinct drugs across the whole dataset, in encounter order.
    pub fn all_drugs(&self) -> &[String] {
        &self.drugs
    }

    /// Distinct drugs reviewed for `condition`, in encounter order.
    /// Exact, case-sensitive match; unknown conditions yield an empty slice.
    pub fn drugs_for(&self, condition: &str) -> &[String] {
        self.drugs_by_condition
            .get(condition)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All records in stored order.
    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    /// Records whose age falls in `bucket`. Rows without a bucket never match.
    pub fn records_in_bucket(&self, bucket: AgeBucket) -> impl Iterator<Item = &ReviewRecord> {
        self.records.iter().filter(move |r| r.age_bucket == Some(bucket))
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
