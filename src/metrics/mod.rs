//! # Derived Metrics
//!
//! Pure functions deriving comparison metrics between two glucose
//! reference levels of a measurement collection: frequency [`shift`],
//! [`sensitivity`] and [`amplitude_delta`].
//!
//! Row lookup is epsilon-tolerant: a row matches a queried level when its
//! stored glucose differs by less than [`GLUCOSE_TOLERANCE`] mg/dL. Rows
//! are scanned linearly and the first match in insertion order wins, so
//! with several rows inside the tolerance the outcome is order-dependent.
//! That behavior is kept deliberately and pinned by a test.
//!
//! Absent reference rows are not errors: every function returns `None`
//! and callers render "N/A". Parse failures, by contrast, are hard
//! errors raised by the [`crate::parser`] module; the two channels never
//! mix.

use crate::model::{SweepField, SweepRow};
use crate::parser::MeasurementRecord;


/// Absolute glucose tolerance for reference-row lookups, in mg/dL.
///
/// Comfortably covers the parser's two-decimal position rounding.
pub const GLUCOSE_TOLERANCE: f64 = 0.1;

/// Unit scale between shift and sensitivity: GHz → MHz.
const SHIFT_UNIT_SCALE: f64 = 1000.0;

/// A row the metric functions can read: a glucose level plus measured
/// values selectable through a typed field identifier.
pub trait MeasurementRow {
    /// Field selector for this row type
    type Field: Copy;

    /// Glucose level of the row in mg/dL
    fn glucose(&self) -> f64;

    /// Measured value for the selected field
    fn value(&self, field: Self::Field) -> f64;
}

/// Selectable field of a parsed [`MeasurementRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// Resonance frequency (GHz)
    Frequency,
    /// Signal amplitude (dB)
    Amplitude,
}

impl MeasurementRow for MeasurementRecord {
    type Field = RecordField;

    fn glucose(&self) -> f64 {
        self.glucose
    }

    fn value(&self, field: RecordField) -> f64 {
        match field {
            RecordField::Frequency => self.frequency,
            RecordField::Amplitude => self.amplitude,
        }
    }
}

impl MeasurementRow for SweepRow {
    type Field = SweepField;

    fn glucose(&self) -> f64 {
        self.glucose
    }

    fn value(&self, field: SweepField) -> f64 {
        field.of(self)
    }
}

/// Find the first row within [`GLUCOSE_TOLERANCE`] of the queried level.
///
/// Rows are not assumed sorted; the scan is linear in insertion order.
pub fn find_row<R: MeasurementRow>(rows: &[R], glucose: f64) -> Option<&R> {
    rows.iter()
        .find(|row| (row.glucose() - glucose).abs() < GLUCOSE_TOLERANCE)
}

/// Difference of a field's value between two reference levels
/// (`end - start`), or `None` if either reference row is absent.
pub fn shift<R: MeasurementRow>(
    rows: &[R],
    field: R::Field,
    start_glucose: f64,
    end_glucose: f64,
) -> Option<f64> {
    let start = find_row(rows, start_glucose)?;
    let end = find_row(rows, end_glucose)?;
    Some(end.value(field) - start.value(field))
}

/// Sensitivity in MHz per mg/dL: the shift (GHz) scaled to MHz and
/// divided by the glucose span.
///
/// `None` when the shift is unavailable or the span is exactly zero;
/// the zero guard is intentionally an exact comparison, not an epsilon.
pub fn sensitivity(shift: Option<f64>, glucose_delta: f64) -> Option<f64> {
    let shift = shift?;
    if glucose_delta == 0.0 {
        return None;
    }
    Some(shift * SHIFT_UNIT_SCALE / glucose_delta)
}

/// Amplitude difference between two reference levels, in the field's own
/// unit (no scaling). Same lookup rules as [`shift`].
pub fn amplitude_delta<R: MeasurementRow>(
    rows: &[R],
    field: R::Field,
    start_glucose: f64,
    end_glucose: f64,
) -> Option<f64> {
    let start = find_row(rows, start_glucose)?;
    let end = find_row(rows, end_glucose)?;
    Some(end.value(field) - start.value(field))
}
