//! # glucosense - Antenna Glucose Sensing Toolkit
//!
//! `glucosense` is the data-entry and derived-metrics core for antenna
//! based glucose characterization experiments: wearable split-ring
//! antennas are measured against blood-glucose phantom concentrations,
//! and the resonance shift of the S-parameters tracks the glucose level.
//!
//! ## Key Features
//!
//! - **Strict measurement parsing**: free-form `freq amp` text lines
//!   become positioned records with descriptive, line-numbered errors on
//!   malformed input.
//!
//! - **Lenient bulk import**: `(freq, amp)` pairs are extracted from
//!   arbitrary pasted text for filling S-parameter tables.
//!
//! - **Derived metrics**: frequency shift, sensitivity (MHz per mg/dL)
//!   and amplitude delta between any two glucose reference levels, with
//!   absence modeled as `Option` rather than errors.
//!
//! - **Typed datasets**: six substrate × ring-count buckets with typed
//!   rows, CSV import/export, and a versioned JSON snapshot format.
//!
//! ## Quick Start
//!
//! ```rust
//! use glucosense::parser;
//! use glucosense::metrics::{self, RecordField};
//!
//! let records = parser::parse("2.45 -10\n2.40 -14\n2.31 -19")?;
//! assert_eq!(records[1].glucose, 500.0);
//!
//! let shift = metrics::shift(&records, RecordField::Frequency, 0.0, 1000.0);
//! let sensitivity = metrics::sensitivity(shift, 1000.0);
//! assert!(sensitivity.is_some());
//! # Ok::<(), glucosense::parser::ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`parser`]: strict and lenient measurement text parsing
//! - [`metrics`]: pure derived-metric functions over typed rows
//! - [`model`]: dataset buckets, sweep tables, antenna parameters, runs
//! - [`store`]: the owned in-memory collection of tables and runs
//! - [`snapshot`]: versioned whole-state JSON export/import
//! - [`storage`]: the persistence boundary and its file-backed impl
//! - [`validator`]: consistency checks with a printable report
//! - [`config`]: TOML defaults for the CLI

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::metrics::{
        amplitude_delta, find_row, sensitivity, shift, MeasurementRow, RecordField,
        GLUCOSE_TOLERANCE,
    };
    pub use crate::model::{
        AntennaParameters, DatasetKey, Port, PortSample, Run, RunMetrics, Substrate, SweepField,
        SweepRow, SweepTable, GLUCOSE_ANCHORS,
    };
    pub use crate::parser::{extract_pairs, parse, MeasurementRecord, ParseError};
    pub use crate::snapshot::{AppState, SnapshotError, STATE_VERSION};
    pub use crate::storage::{
        load_datasets, save_datasets, FileRepository, StateRepository, StorageError,
    };
    pub use crate::store::ModelStore;
    pub use crate::validator::{validate_store, StateReport};
}
