//! Per-window prediction state and the pure functions that advance and render it.

mod gate;
mod render;

pub use gate::advance;
pub use render::{ConfidenceTone, RenderedPrediction, capitalize_label, render};

use crate::dataset::Measurements;
use crate::ml::{Algorithm, Prediction};

/// Inputs and outcome of the most recent recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRecord {
    pub inputs: Measurements,
    pub algorithm: Algorithm,
    /// `None` when the model failed for these inputs.
    pub prediction: Option<Prediction>,
}

/// State carried from one frame to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// `None` until the first prediction has been attempted.
    pub last: Option<GateRecord>,
}

impl SessionState {
    /// The prediction to display, if any.
    pub fn prediction(&self) -> Option<&Prediction> {
        self.last.as_ref().and_then(|record| record.prediction.as_ref())
    }

    /// Inputs that produced the current record.
    pub fn inputs(&self) -> Option<Measurements> {
        self.last.as_ref().map(|record| record.inputs)
    }
}
