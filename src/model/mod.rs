//! # Domain Model
//!
//! Typed data model for the characterization experiments:
//!
//! - [`DatasetKey`]: the six measurement buckets (substrate × ring count)
//! - [`SweepTable`] / [`SweepRow`]: S-parameter tables keyed by glucose level
//! - [`AntennaParameters`]: named antenna geometry configurations
//! - [`Run`]: a parameter set together with its parsed measurement input
//!   and derived metrics
//!
//! Rows are strongly typed; the metrics layer selects values through the
//! [`SweepField`] and port enums instead of string field names.

mod dataset;
mod parameters;
mod run;
mod validation;

#[cfg(test)]
mod tests;

pub use dataset::{
    DatasetKey, Port, PortSample, Substrate, SweepField, SweepRow, SweepTable, TableError,
    GLUCOSE_ANCHORS,
};
pub use parameters::{AntennaParameters, InvalidParameters};
pub use run::{Run, RunMetrics};
pub use validation::{validate_amplitude, validate_frequency, validate_glucose, ValidationError};
