//! # State Snapshots
//!
//! Versioned export/import of the whole store as JSON: all six dataset
//! tables plus every run with its parameters, raw input, records and
//! metrics. The JSON layout is the external interchange format; the
//! version field gates imports from incompatible releases.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::model::{DatasetKey, Run, SweepTable};
use crate::store::ModelStore;

/// Current snapshot schema version
pub const STATE_VERSION: u32 = 1;

/// Errors raised by snapshot encoding and decoding
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Malformed JSON or missing required fields (including `version`)
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot written by an incompatible release
    #[error("unsupported snapshot version {found}, expected {STATE_VERSION}")]
    UnsupportedVersion {
        /// Version found in the snapshot
        found: u32,
    },
}

/// A complete, self-describing snapshot of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Snapshot schema version
    pub version: u32,
    /// Capture time
    pub timestamp: DateTime<Utc>,
    /// All dataset tables, keyed by their stable storage keys
    pub datasets: BTreeMap<DatasetKey, SweepTable>,
    /// All runs in creation order
    pub runs: Vec<Run>,
}

impl AppState {
    /// Capture the current store contents
    pub fn capture(store: &ModelStore) -> Self {
        let datasets = DatasetKey::ALL
            .iter()
            .map(|&key| (key, store.dataset(key).clone()))
            .collect();

        Self {
            version: STATE_VERSION,
            timestamp: Utc::now(),
            datasets,
            runs: store.runs().to_vec(),
        }
    }

    /// Restore this snapshot into a store.
    ///
    /// Tables present in the snapshot replace the store's tables; buckets
    /// the snapshot omits keep their current rows. The run list is
    /// replaced wholesale.
    pub fn apply(self, store: &mut ModelStore) {
        info!(
            "applying snapshot from {} ({} run(s))",
            self.timestamp,
            self.runs.len()
        );
        for (key, table) in self.datasets {
            *store.dataset_mut(key) = table;
        }
        store.replace_runs(self.runs);
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, rejecting unknown versions
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let state: Self = serde_json::from_str(json)?;
        if state.version != STATE_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: state.version,
            });
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_roundtrip() {
        let mut store = ModelStore::with_default_runs();
        store
            .dataset_mut(DatasetKey::Felt2Ring)
            .set_value(0, crate::model::SweepField::S11Frequency, 2.45)
            .unwrap();

        let json = AppState::capture(&store).to_json().unwrap();
        let restored = AppState::from_json(&json).unwrap();

        let mut fresh = ModelStore::new();
        restored.apply(&mut fresh);

        assert_eq!(fresh.runs().len(), 2);
        assert_eq!(
            fresh.dataset(DatasetKey::Felt2Ring).rows[0].s11.frequency,
            2.45
        );
    }

    #[test]
    fn missing_version_is_a_json_error() {
        let err = AppState::from_json(r#"{"datasets": {}, "runs": []}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let mut state = AppState::capture(&ModelStore::new());
        state.version = 99;
        let json = serde_json::to_string(&state).unwrap();

        let err = AppState::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found: 99 }
        ));
    }

    #[test]
    fn dataset_keys_serialize_as_storage_keys() {
        let json = AppState::capture(&ModelStore::new()).to_json().unwrap();
        assert!(json.contains("\"felt_1_ring\""));
        assert!(json.contains("\"jeans_3_ring\""));
    }
}
