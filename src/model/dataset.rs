use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{
    validate_amplitude, validate_frequency, validate_glucose, ValidationError,
};

/// Antenna substrate material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Substrate {
    /// Felt textile substrate
    Felt,
    /// Denim (jeans) textile substrate
    Jeans,
}

impl fmt::Display for Substrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substrate::Felt => write!(f, "Felt"),
            Substrate::Jeans => write!(f, "Jeans"),
        }
    }
}

/// One of the six measurement buckets: substrate material × split-ring count.
///
/// Serialized under stable snake_case keys (`felt_1_ring`, ...) so saved
/// state stays compatible across releases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DatasetKey {
    /// Felt substrate, single ring resonator
    #[serde(rename = "felt_1_ring")]
    Felt1Ring,
    /// Felt substrate, two ring resonators
    #[serde(rename = "felt_2_ring")]
    Felt2Ring,
    /// Felt substrate, three ring resonators
    #[serde(rename = "felt_3_ring")]
    Felt3Ring,
    /// Jeans substrate, single ring resonator
    #[serde(rename = "jeans_1_ring")]
    Jeans1Ring,
    /// Jeans substrate, two ring resonators
    #[serde(rename = "jeans_2_ring")]
    Jeans2Ring,
    /// Jeans substrate, three ring resonators
    #[serde(rename = "jeans_3_ring")]
    Jeans3Ring,
}

impl DatasetKey {
    /// All buckets in canonical display order
    pub const ALL: [DatasetKey; 6] = [
        DatasetKey::Felt1Ring,
        DatasetKey::Felt2Ring,
        DatasetKey::Felt3Ring,
        DatasetKey::Jeans1Ring,
        DatasetKey::Jeans2Ring,
        DatasetKey::Jeans3Ring,
    ];

    /// Stable storage key, e.g. `felt_1_ring`
    pub fn key(&self) -> &'static str {
        match self {
            DatasetKey::Felt1Ring => "felt_1_ring",
            DatasetKey::Felt2Ring => "felt_2_ring",
            DatasetKey::Felt3Ring => "felt_3_ring",
            DatasetKey::Jeans1Ring => "jeans_1_ring",
            DatasetKey::Jeans2Ring => "jeans_2_ring",
            DatasetKey::Jeans3Ring => "jeans_3_ring",
        }
    }

    /// Human-readable label, e.g. `Felt 1 Ring`
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKey::Felt1Ring => "Felt 1 Ring",
            DatasetKey::Felt2Ring => "Felt 2 Ring",
            DatasetKey::Felt3Ring => "Felt 3 Ring",
            DatasetKey::Jeans1Ring => "Jeans 1 Ring",
            DatasetKey::Jeans2Ring => "Jeans 2 Ring",
            DatasetKey::Jeans3Ring => "Jeans 3 Ring",
        }
    }

    /// Substrate half of the bucket
    pub fn substrate(&self) -> Substrate {
        match self {
            DatasetKey::Felt1Ring | DatasetKey::Felt2Ring | DatasetKey::Felt3Ring => {
                Substrate::Felt
            }
            _ => Substrate::Jeans,
        }
    }

    /// Ring count half of the bucket (1..=3)
    pub fn ring_count(&self) -> u8 {
        match self {
            DatasetKey::Felt1Ring | DatasetKey::Jeans1Ring => 1,
            DatasetKey::Felt2Ring | DatasetKey::Jeans2Ring => 2,
            DatasetKey::Felt3Ring | DatasetKey::Jeans3Ring => 3,
        }
    }

    /// Position of this bucket within [`DatasetKey::ALL`]
    pub(crate) fn index(&self) -> usize {
        match self {
            DatasetKey::Felt1Ring => 0,
            DatasetKey::Felt2Ring => 1,
            DatasetKey::Felt3Ring => 2,
            DatasetKey::Jeans1Ring => 3,
            DatasetKey::Jeans2Ring => 4,
            DatasetKey::Jeans3Ring => 5,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DatasetKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetKey::ALL
            .iter()
            .find(|k| k.key() == s)
            .copied()
            .ok_or_else(|| TableError::UnknownDataset(s.to_string()))
    }
}

/// One measured S-parameter sample: resonance frequency plus amplitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortSample {
    /// Resonance frequency in GHz
    pub frequency: f64,
    /// Signal amplitude in dB
    pub amplitude: f64,
}

/// S-parameter port of a two-port measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Port {
    /// Reflection coefficient port
    S11,
    /// Transmission coefficient port
    S21,
}

impl Port {
    /// Borrow this port's sample from a row
    pub fn sample(self, row: &SweepRow) -> &PortSample {
        match self {
            Port::S11 => &row.s11,
            Port::S21 => &row.s21,
        }
    }

    /// Mutably borrow this port's sample from a row
    pub fn sample_mut(self, row: &mut SweepRow) -> &mut PortSample {
        match self {
            Port::S11 => &mut row.s11,
            Port::S21 => &mut row.s21,
        }
    }
}

/// Selectable measured field of a [`SweepRow`].
///
/// Replaces the loosely typed string field names (`s11_freq`, ...) of the
/// browser tool with an enum the metrics functions can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepField {
    /// S11 resonance frequency (GHz)
    S11Frequency,
    /// S11 amplitude (dB)
    S11Amplitude,
    /// S21 resonance frequency (GHz)
    S21Frequency,
    /// S21 amplitude (dB)
    S21Amplitude,
}

impl SweepField {
    /// Value of this field in the given row
    pub fn of(self, row: &SweepRow) -> f64 {
        match self {
            SweepField::S11Frequency => row.s11.frequency,
            SweepField::S11Amplitude => row.s11.amplitude,
            SweepField::S21Frequency => row.s21.frequency,
            SweepField::S21Amplitude => row.s21.amplitude,
        }
    }

    /// Whether this field holds a frequency (as opposed to an amplitude)
    pub fn is_frequency(self) -> bool {
        matches!(self, SweepField::S11Frequency | SweepField::S21Frequency)
    }

    /// Port this field belongs to
    pub fn port(self) -> Port {
        match self {
            SweepField::S11Frequency | SweepField::S11Amplitude => Port::S11,
            SweepField::S21Frequency | SweepField::S21Amplitude => Port::S21,
        }
    }

    /// Stable storage name, e.g. `s11_freq`
    pub fn key(self) -> &'static str {
        match self {
            SweepField::S11Frequency => "s11_freq",
            SweepField::S11Amplitude => "s11_amp",
            SweepField::S21Frequency => "s21_freq",
            SweepField::S21Amplitude => "s21_amp",
        }
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SweepField {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s11_freq" => Ok(SweepField::S11Frequency),
            "s11_amp" => Ok(SweepField::S11Amplitude),
            "s21_freq" => Ok(SweepField::S21Frequency),
            "s21_amp" => Ok(SweepField::S21Amplitude),
            other => Err(TableError::UnknownField(other.to_string())),
        }
    }
}

/// One row of a measurement table: a glucose level plus one sample per port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Glucose concentration level in mg/dL
    pub glucose: f64,
    /// S11 (reflection) sample
    pub s11: PortSample,
    /// S21 (transmission) sample
    pub s21: PortSample,
}

impl SweepRow {
    /// A zeroed row at the given glucose level
    pub fn at(glucose: f64) -> Self {
        Self {
            glucose,
            ..Default::default()
        }
    }
}

/// Standard glucose anchor levels in mg/dL that new tables are seeded with.
pub const GLUCOSE_ANCHORS: [f64; 7] = [0.0, 72.0, 216.0, 330.0, 500.0, 600.0, 1000.0];

/// Errors raised by table lookups and CSV import/export
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Row index outside the table
    #[error("row index {0} out of range")]
    RowOutOfRange(usize),

    /// A field value failed validation
    #[error("invalid value for {field} in row {row}: {source}")]
    InvalidValue {
        /// 0-based row index
        row: usize,
        /// Storage name of the rejected field
        field: &'static str,
        /// Underlying validation failure
        source: ValidationError,
    },

    /// Unknown dataset storage key
    #[error("unknown dataset key: {0}")]
    UnknownDataset(String),

    /// Unknown sweep field storage name
    #[error("unknown field name: {0}")]
    UnknownField(String),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Flat CSV representation of a [`SweepRow`]
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    glucose: f64,
    s11_freq: f64,
    s11_amp: f64,
    s21_freq: f64,
    s21_amp: f64,
}

/// An ordered measurement table for one dataset bucket.
///
/// Rows are not required to be sorted or unique by glucose level; metric
/// lookups tolerate 0.1 mg/dL and take the first match in row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweepTable {
    /// Table rows in insertion order
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    /// A table seeded with zeroed rows at the standard anchor levels
    pub fn new() -> Self {
        Self {
            rows: GLUCOSE_ANCHORS.iter().map(|&g| SweepRow::at(g)).collect(),
        }
    }

    /// A table with no rows
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a zeroed row at glucose level 0
    pub fn add_row(&mut self) {
        self.rows.push(SweepRow::default());
    }

    /// Remove the row at `index`
    pub fn delete_row(&mut self, index: usize) -> Result<(), TableError> {
        if index >= self.rows.len() {
            return Err(TableError::RowOutOfRange(index));
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Set the glucose level of the row at `index` (must be finite and
    /// non-negative)
    pub fn set_glucose(&mut self, index: usize, value: f64) -> Result<(), TableError> {
        validate_glucose(value).map_err(|source| TableError::InvalidValue {
            row: index,
            field: "glucose",
            source,
        })?;
        let row = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange(index))?;
        row.glucose = value;
        Ok(())
    }

    /// Set a measured field of the row at `index`.
    ///
    /// Frequencies must be finite and positive; amplitudes merely finite.
    pub fn set_value(
        &mut self,
        index: usize,
        field: SweepField,
        value: f64,
    ) -> Result<(), TableError> {
        let check = if field.is_frequency() {
            validate_frequency(value)
        } else {
            validate_amplitude(value)
        };
        check.map_err(|source| TableError::InvalidValue {
            row: index,
            field: field.key(),
            source,
        })?;

        let row = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange(index))?;
        match field {
            SweepField::S11Frequency => row.s11.frequency = value,
            SweepField::S11Amplitude => row.s11.amplitude = value,
            SweepField::S21Frequency => row.s21.frequency = value,
            SweepField::S21Amplitude => row.s21.amplitude = value,
        }
        Ok(())
    }

    /// Map bulk-imported pairs onto existing rows in order.
    ///
    /// Pairs beyond the current row count are ignored; rows beyond the
    /// pair count keep their previous values. This matches the lenient
    /// bulk-import contract: the pairs carry no glucose levels of their
    /// own.
    pub fn apply_pairs(&mut self, port: Port, pairs: &[PortSample]) {
        for (row, pair) in self.rows.iter_mut().zip(pairs) {
            *port.sample_mut(row) = *pair;
        }
    }

    /// Read a table from CSV with the header
    /// `glucose,s11_freq,s11_amp,s21_freq,s21_amp`
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .has_headers(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let record: CsvRow = record?;
            rows.push(SweepRow {
                glucose: record.glucose,
                s11: PortSample {
                    frequency: record.s11_freq,
                    amplitude: record.s11_amp,
                },
                s21: PortSample {
                    frequency: record.s21_freq,
                    amplitude: record.s21_amp,
                },
            });
        }
        Ok(Self { rows })
    }

    /// Write the table as CSV with a header row
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(CsvRow {
                glucose: row.glucose,
                s11_freq: row.s11.frequency,
                s11_amp: row.s11.amplitude,
                s21_freq: row.s21.frequency,
                s21_amp: row.s21.amplitude,
            })?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
