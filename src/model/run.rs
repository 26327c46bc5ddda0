use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::{self, RecordField};
use crate::parser::{self, MeasurementRecord, ParseError, GLUCOSE_DOMAIN_MAX};

use super::{AntennaParameters, InvalidParameters};

/// Derived metrics for one run, computed between two glucose reference
/// levels.
///
/// `None` means one or both reference rows were absent (or, for
/// sensitivity, the reference span was zero); callers render that as
/// "N/A". Metrics are recomputed from the records on every change and
/// never cached independently of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Total frequency shift across the reference span, in GHz
    pub shift: Option<f64>,
    /// Sensitivity in MHz per mg/dL
    pub sensitivity: Option<f64>,
    /// Amplitude delta across the reference span, in dB
    pub amplitude_delta: Option<f64>,
}

impl RunMetrics {
    /// Compute metrics for a record set between `start` and `end` mg/dL.
    pub fn compute(records: &[MeasurementRecord], start: f64, end: f64) -> Self {
        let shift = metrics::shift(records, RecordField::Frequency, start, end);
        Self {
            shift,
            sensitivity: metrics::sensitivity(shift, end - start),
            amplitude_delta: metrics::amplitude_delta(records, RecordField::Amplitude, start, end),
        }
    }
}

/// One optimization run: a parameter set plus its measurement input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Unique run identifier
    pub id: Uuid,
    /// Display name, e.g. `Run 3` or `Jeans Config`
    pub name: String,
    /// Antenna geometry for this run
    pub parameters: AntennaParameters,
    /// Raw measurement text as last entered
    pub raw_input: String,
    /// Parsed records derived from `raw_input`
    pub records: Vec<MeasurementRecord>,
    /// Metrics derived from `records` over the full glucose domain
    pub metrics: RunMetrics,
}

impl Run {
    /// Create an empty run with default geometry and a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parameters: AntennaParameters::default(),
            raw_input: String::new(),
            records: Vec::new(),
            metrics: RunMetrics::default(),
        }
    }

    /// Replace the geometry after validating it
    pub fn set_parameters(&mut self, parameters: AntennaParameters) -> Result<(), InvalidParameters> {
        parameters.validate()?;
        self.parameters = parameters;
        Ok(())
    }

    /// Parse measurement text and store the result.
    ///
    /// The raw text is kept even when parsing fails, mirroring an editor
    /// buffer; records and metrics only change on success.
    pub fn apply_input(&mut self, text: &str) -> Result<(), ParseError> {
        self.raw_input = text.to_string();
        self.records = parser::parse(text)?;
        self.recompute_metrics();
        Ok(())
    }

    /// Recompute metrics over the full glucose domain `[0, 1000]`
    pub fn recompute_metrics(&mut self) {
        self.metrics = RunMetrics::compute(&self.records, 0.0, GLUCOSE_DOMAIN_MAX);
    }

    /// Drop input, records and metrics, keeping name and geometry
    pub fn clear(&mut self) {
        self.raw_input.clear();
        self.records.clear();
        self.metrics = RunMetrics::default();
    }
}
