//! Species models: label encoding, the two predictor variants and training.
//!
//! Both variants implement [`SpeciesPredictor`], so the prediction session can
//! switch between them without knowing how either produces its confidence.

pub mod label_codec;
pub mod linear;
pub mod logreg;
pub mod metrics;
pub mod models;

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::dataset::Measurements;

pub use label_codec::{DecodeError, LabelCodec};
pub use linear::LinearSpeciesModel;
pub use logreg::LogisticSpeciesModel;
pub use models::{TrainError, TrainedModels};

/// Model family used to produce a prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Least squares on the encoded label, rounded to the nearest class.
    #[default]
    LinearRegression,
    /// Multinomial logistic regression.
    LogisticRegression,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::LinearRegression, Algorithm::LogisticRegression];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::LinearRegression => "Linear Regression",
            Algorithm::LogisticRegression => "Logistic Regression",
        }
    }

    /// One-line description shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::LinearRegression => {
                "This application uses a Linear Regression model to predict the species of an Iris flower based on its dimensions."
            }
            Algorithm::LogisticRegression => {
                "This application uses a Logistic Regression classifier to predict the species of an Iris flower based on its dimensions."
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded species with the model's confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub species: String,
    pub confidence: f64,
}

/// Failure inside a model while producing a prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The predicted class code does not map to a known species.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The model produced NaN or infinity.
    #[error("Model produced a non-finite output: {0}")]
    NonFinite(f64),
    /// The classifier returned no class probabilities.
    #[error("Classifier returned no class probabilities")]
    NoProbabilities,
    /// The underlying linfa model rejected the input.
    #[error("Linear model prediction failed: {0}")]
    Linfa(String),
}

/// Capability shared by every species model.
pub trait SpeciesPredictor {
    /// Which algorithm this model implements.
    fn algorithm(&self) -> Algorithm;

    /// Predict the species for one set of measurements.
    fn predict(&self, measurements: &Measurements) -> Result<Prediction, PredictError>;
}

/// Compute a numerically-stable softmax for a set of logits.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut exps: Vec<f64> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![1.0 / logits.len() as f64; logits.len()];
    }
    for v in &mut exps {
        *v /= sum;
    }
    exps
}
