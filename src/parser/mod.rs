//! # Measurement Input Parsing
//!
//! Converts raw multi-line measurement text into structured
//! frequency/amplitude records positioned along the glucose domain.
//!
//! Two entry points with deliberately different contracts:
//!
//! 1. [`parse`] — the strict, line-oriented parser used for run input.
//!    Every non-blank line must resolve to exactly two numeric values;
//!    a single malformed line rejects the whole input with a
//!    [`ParseError`] naming the line.
//!
//! 2. [`extract_pairs`] — the lenient bulk-import scanner. It pulls
//!    `(frequency, amplitude)` groups out of arbitrary pasted text
//!    (simulator logs, spreadsheet fragments) and silently skips
//!    anything that does not match. It never fails.
//!
//! Parsed records receive synthetic glucose levels spread linearly
//! across `[0, 1000]` mg/dL; the actual measured values play no role in
//! positioning.

use serde::{Deserialize, Serialize};

use crate::model::PortSample;

mod error;

#[cfg(test)]
mod tests;

pub use error::ParseError;

/// Upper bound of the synthetic glucose domain in mg/dL.
pub const GLUCOSE_DOMAIN_MAX: f64 = 1000.0;

/// One parsed measurement: a frequency/amplitude pair positioned on the
/// glucose domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Synthetic glucose level in mg/dL, assigned by [`parse`].
    pub glucose: f64,
    /// Measured resonance frequency in GHz.
    pub frequency: f64,
    /// Measured signal amplitude in dB.
    pub amplitude: f64,
}

/// Parse strict line-oriented measurement input.
///
/// Accepted line shapes: `"2.45 -10"`, `"2.45, -10"`, `"(2.45, -10)"`.
/// Blank lines inside the input are skipped but still count toward the
/// line numbers reported in errors. The whole input is trimmed first,
/// so leading blank lines never shift numbering.
///
/// Position assignment: a single record sits at glucose 0; with N > 1
/// records, record i gets `1000 * i / (N - 1)` mg/dL, rounded to two
/// decimals.
///
/// Parsing is all-or-nothing: on error no records are returned.
pub fn parse(text: &str) -> Result<Vec<MeasurementRecord>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();

    for (index, line) in trimmed.lines().enumerate() {
        let clean = line.trim();
        if clean.is_empty() {
            continue;
        }

        match parse_pair(clean) {
            Some((frequency, amplitude)) => pairs.push((frequency, amplitude)),
            None => {
                return Err(ParseError::InvalidLine {
                    line: index + 1,
                    text: clean.to_string(),
                })
            }
        }
    }

    Ok(assign_glucose(&pairs))
}

/// Extract `(frequency, amplitude)` groups from free-form text.
///
/// Scans for parenthesized groups anywhere in the input; a group counts
/// only if its body splits into exactly two numeric tokens. Malformed
/// groups and surrounding junk are skipped without error. No glucose
/// positions are assigned; callers map the pairs onto existing table
/// rows in order.
pub fn extract_pairs(text: &str) -> Vec<PortSample> {
    let mut pairs = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(')') else {
            break;
        };

        if let Some((frequency, amplitude)) = parse_pair(&after_open[..close]) {
            pairs.push(PortSample {
                frequency,
                amplitude,
            });
        }

        rest = &after_open[close + 1..];
    }

    pairs
}

/// Split a line body into tokens and accept exactly two numbers.
///
/// Parentheses are stripped so `(2.45, -10)` and `2.45 -10` tokenize
/// identically; separators are any run of whitespace and/or commas.
fn parse_pair(body: &str) -> Option<(f64, f64)> {
    let mut tokens = body
        .split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .filter(|t| !t.is_empty());

    let first: f64 = tokens.next()?.parse().ok()?;
    let second: f64 = tokens.next()?.parse().ok()?;

    if tokens.next().is_some() {
        return None;
    }

    Some((first, second))
}

/// Spread records linearly across the glucose domain.
fn assign_glucose(pairs: &[(f64, f64)]) -> Vec<MeasurementRecord> {
    let n = pairs.len();

    if n == 1 {
        let (frequency, amplitude) = pairs[0];
        return vec![MeasurementRecord {
            glucose: 0.0,
            frequency,
            amplitude,
        }];
    }

    pairs
        .iter()
        .enumerate()
        .map(|(i, &(frequency, amplitude))| {
            let glucose = GLUCOSE_DOMAIN_MAX * i as f64 / (n - 1) as f64;
            MeasurementRecord {
                // Two decimals for display, half away from zero.
                glucose: (glucose * 100.0).round() / 100.0,
                frequency,
                amplitude,
            }
        })
        .collect()
}
