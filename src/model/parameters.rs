use serde::{Deserialize, Serialize};

use super::Substrate;

/// Named antenna geometry configuration for one optimization run.
///
/// Dimensions are in millimetres unless noted. Field names follow the
/// symbols used on the antenna drawings, so they stay short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaParameters {
    /// Substrate material
    pub substrate: Substrate,
    /// Number of split-ring resonators
    pub ring_count: u8,
    /// Substrate height
    pub h: f64,
    /// Conductor thickness
    pub t: f64,
    /// Ring gap widths
    pub g1: f64,
    /// Second ring gap width
    pub g2: f64,
    /// Third ring gap width
    pub g3: f64,
    /// Ring trace widths
    pub w1: f64,
    /// Second ring trace width
    pub w2: f64,
    /// Third ring trace width
    pub w3: f64,
    /// Substrate width
    pub ws: f64,
    /// Ring segment length
    pub l1: f64,
    /// Ring segment length
    pub l2: f64,
    /// Ring segment length
    pub l3: f64,
    /// Ring segment length
    pub l4: f64,
    /// Ring segment length
    pub l5: f64,
    /// Ring segment length
    pub l6: f64,
    /// Feed line length
    pub lf: f64,
    /// Substrate length
    pub ls: f64,
    /// Blood phantom height
    pub bheight: f64,
    /// Blood phantom thickness
    pub bthick: f64,
}

impl Default for AntennaParameters {
    fn default() -> Self {
        Self {
            substrate: Substrate::Felt,
            ring_count: 2,
            h: 1.0,
            t: 0.035,
            g1: 6.0,
            g2: 8.0,
            g3: 3.0,
            w1: 3.57,
            w2: 3.0,
            w3: 3.0,
            ws: 50.0,
            l1: 40.0,
            l2: 40.0,
            l3: 30.0,
            l4: 30.0,
            l5: 20.0,
            l6: 20.0,
            lf: 40.0,
            ls: 98.0,
            bheight: 3.0,
            bthick: 0.5,
        }
    }
}

impl AntennaParameters {
    /// Check the geometry for negative dimensions.
    ///
    /// Only the fields the drawing treats as lengths are checked; `t`,
    /// `bheight` and `bthick` are accepted as-is.
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        let checked: [(&'static str, f64); 16] = [
            ("h", self.h),
            ("g1", self.g1),
            ("g2", self.g2),
            ("g3", self.g3),
            ("w1", self.w1),
            ("w2", self.w2),
            ("w3", self.w3),
            ("ws", self.ws),
            ("l1", self.l1),
            ("l2", self.l2),
            ("l3", self.l3),
            ("l4", self.l4),
            ("l5", self.l5),
            ("l6", self.l6),
            ("lf", self.lf),
            ("ls", self.ls),
        ];

        let fields: Vec<&'static str> = checked
            .iter()
            .filter(|(_, v)| *v < 0.0 || !v.is_finite())
            .map(|(name, _)| *name)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(InvalidParameters { fields })
        }
    }
}

/// Rejected antenna geometry, listing every offending field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("negative geometry values: {}", fields.join(", "))]
pub struct InvalidParameters {
    /// Names of the rejected fields, in declaration order
    pub fields: Vec<&'static str>,
}
