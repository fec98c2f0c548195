//! Display-ready snapshot produced by the controller for one frame.

use crate::ml::Algorithm;
use crate::session::RenderedPrediction;

/// Banner shown when the dataset or the models are unavailable.
pub const LOAD_WARNING: &str = "Dataset failed to load. Please check the data source.";

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    /// Startup failed; only the warning is shown.
    Warning {
        /// Fixed banner text.
        message: &'static str,
        /// Underlying error, shown in smaller type.
        detail: String,
    },
    /// Models are ready; the prediction line may still be absent.
    Ready(ReadyView),
}

/// Frame content once models are trained.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    /// Algorithm actually used for this frame.
    pub algorithm: Algorithm,
    pub prediction: Option<RenderedPrediction>,
}

impl ViewModel {
    pub fn warning(detail: impl Into<String>) -> Self {
        ViewModel::Warning {
            message: LOAD_WARNING,
            detail: detail.into(),
        }
    }

    pub fn prediction(&self) -> Option<&RenderedPrediction> {
        match self {
            ViewModel::Ready(view) => view.prediction.as_ref(),
            ViewModel::Warning { .. } => None,
        }
    }
}
