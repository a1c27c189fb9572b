//! Read-only profile dataset and its default cumulative table.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ProfileError;
use crate::filter::FilterSpec;
use crate::pool::WeightedPool;
use crate::record::ProfileRecord;

static BUNDLED_JSON: &str = include_str!("../data/user-agents.json");

static BUNDLED: Lazy<Arc<ProfileDataset>> = Lazy::new(|| {
    match ProfileDataset::from_json(BUNDLED_JSON) {
        Ok(dataset) => Arc::new(dataset),
        Err(error) => {
            tracing::error!(
                event = "mimic.profiles.bundled.load_failed",
                error = %error,
                "bundled profile dataset failed to load; every selection will report no match"
            );
            Arc::new(ProfileDataset::from_records(Vec::new()))
        }
    }
});

/// Ordered, immutable sequence of profile records.
///
/// Safe to share across any number of concurrent selectors without locking.
#[derive(Debug)]
pub struct ProfileDataset {
    records: Vec<ProfileRecord>,
    /// Row each filter is evaluated against, parallel to `records`.
    projections: Vec<Value>,
    default_pool: Arc<WeightedPool>,
}

impl ProfileDataset {
    /// Dataset compiled into the binary, initialised on first use.
    #[must_use]
    pub fn bundled() -> Arc<Self> {
        Arc::clone(&BUNDLED)
    }

    /// Build from records; rows without a finite positive weight are dropped.
    ///
    /// Filters see each record's serialized form, where `None` fields are absent.
    #[must_use]
    pub fn from_records(records: Vec<ProfileRecord>) -> Self {
        Self::from_rows(
            records
                .into_iter()
                .map(|record| {
                    let projection = serde_json::to_value(&record).unwrap_or(Value::Null);
                    (record, projection)
                })
                .collect(),
        )
    }

    /// Parse a JSON array of records.
    ///
    /// Filters see each row exactly as written, so an explicit `null` and an
    /// absent key stay distinguishable.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of profile records.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        let rows = rows
            .into_iter()
            .map(|row| Ok((ProfileRecord::deserialize(&row)?, row)))
            .collect::<Result<Vec<_>, ProfileError>>()?;
        Ok(Self::from_rows(rows))
    }

    fn from_rows(rows: Vec<(ProfileRecord, Value)>) -> Self {
        let total = rows.len();
        let (records, projections): (Vec<ProfileRecord>, Vec<Value>) = rows
            .into_iter()
            .filter(|(record, _)| record.weight.is_finite() && record.weight > 0.0)
            .unzip();
        if records.len() < total {
            tracing::warn!(
                event = "mimic.profiles.dataset.dropped_records",
                dropped = total - records.len(),
                kept = records.len(),
                "dropped profile records with non-positive weight"
            );
        }
        let default_pool = Arc::new(WeightedPool::build(
            records
                .iter()
                .enumerate()
                .map(|(index, record)| (record.weight, index)),
        ));
        Self {
            records,
            projections,
            default_pool,
        }
    }

    /// Load a JSON dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&raw)?;
        tracing::info!(
            event = "mimic.profiles.dataset.loaded",
            path = %path.display(),
            records = dataset.len(),
            "profile dataset loaded"
        );
        Ok(dataset)
    }

    /// Record at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ProfileRecord> {
        self.records.get(index)
    }

    /// All records in dataset order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cumulative table for `filter`; the precomputed full table when `None`.
    #[must_use]
    pub fn pool_for(&self, filter: Option<&FilterSpec>) -> Arc<WeightedPool> {
        let Some(filter) = filter else {
            return Arc::clone(&self.default_pool);
        };
        let matches = filter.compile();
        Arc::new(WeightedPool::build(
            self.records
                .iter()
                .zip(&self.projections)
                .enumerate()
                .filter(|(_, (_, projection))| matches(projection))
                .map(|(index, (record, _))| (record.weight, index)),
        ))
    }
}
