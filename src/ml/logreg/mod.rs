//! Multinomial logistic regression over the four flower measurements.

use crate::dataset::Measurements;
use crate::ml::{
    Algorithm, LabelCodec, PredictError, Prediction, SpeciesPredictor, softmax,
};

mod train;
pub use train::{TrainDataset, TrainOptions, train_logreg};

/// Number of input features.
pub const FEATURE_DIM: usize = 4;

/// Per-feature standardization applied before the linear layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaling {
    pub mean: [f64; FEATURE_DIM],
    pub std: [f64; FEATURE_DIM],
}

impl FeatureScaling {
    /// Column means and population standard deviations of `rows`.
    ///
    /// A constant column gets a unit std so it scales to zero instead of NaN.
    pub fn fit(rows: &[[f64; FEATURE_DIM]]) -> Self {
        let n = rows.len().max(1) as f64;
        let mut mean = [0.0; FEATURE_DIM];
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);
        let mut std = [0.0; FEATURE_DIM];
        for row in rows {
            for i in 0..FEATURE_DIM {
                std[i] += (row[i] - mean[i]).powi(2);
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
            if *s < 1e-12 {
                *s = 1.0;
            }
        }
        Self { mean, std }
    }

    pub fn apply(&self, row: &[f64; FEATURE_DIM]) -> [f64; FEATURE_DIM] {
        let mut out = [0.0; FEATURE_DIM];
        for i in 0..FEATURE_DIM {
            out[i] = (row[i] - self.mean[i]) / self.std[i];
        }
        out
    }
}

/// Softmax classifier weights.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRegModel {
    pub classes: Vec<String>,
    /// Row-major `classes x FEATURE_DIM`.
    pub weights: Vec<f64>,
    pub bias: Vec<f64>,
    pub scaling: FeatureScaling,
}

impl LogRegModel {
    /// Validate weight and bias dimensions against the class list.
    pub fn validate(&self) -> Result<(), String> {
        let classes = self.classes.len();
        if classes == 0 {
            return Err("No classes defined".to_string());
        }
        if self.weights.len() != classes * FEATURE_DIM {
            return Err("weights length mismatch".to_string());
        }
        if self.bias.len() != classes {
            return Err("bias length mismatch".to_string());
        }
        if self.weights.iter().chain(&self.bias).any(|v| !v.is_finite()) {
            return Err("non-finite parameters".to_string());
        }
        Ok(())
    }

    /// Raw class scores for an already standardized row.
    pub(crate) fn logits(&self, scaled: &[f64; FEATURE_DIM]) -> Vec<f64> {
        self.bias
            .iter()
            .enumerate()
            .map(|(c, bias)| {
                let base = c * FEATURE_DIM;
                bias + self.weights[base..base + FEATURE_DIM]
                    .iter()
                    .zip(scaled)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
            })
            .collect()
    }

    /// Class probabilities for one unscaled row.
    pub fn predict_proba(&self, row: &[f64; FEATURE_DIM]) -> Vec<f64> {
        softmax(&self.logits(&self.scaling.apply(row)))
    }

    /// Argmax class index and its probability.
    pub fn predict_top(&self, row: &[f64; FEATURE_DIM]) -> Option<(usize, f64)> {
        self.predict_proba(row)
            .into_iter()
            .enumerate()
            .fold(None, |best, (idx, p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((idx, p)),
            })
    }
}

/// Classifier variant: arg-max class with its posterior as confidence.
#[derive(Debug, Clone)]
pub struct LogisticSpeciesModel {
    model: LogRegModel,
    codec: LabelCodec,
}

impl LogisticSpeciesModel {
    pub fn new(model: LogRegModel, codec: LabelCodec) -> Self {
        Self { model, codec }
    }

    /// Class probabilities in codec order.
    pub fn predict_proba(&self, measurements: &Measurements) -> Vec<f64> {
        self.model.predict_proba(&measurements.to_array())
    }
}

impl SpeciesPredictor for LogisticSpeciesModel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LogisticRegression
    }

    fn predict(&self, measurements: &Measurements) -> Result<Prediction, PredictError> {
        let (class, confidence) = self
            .model
            .predict_top(&measurements.to_array())
            .ok_or(PredictError::NoProbabilities)?;
        if !confidence.is_finite() {
            return Err(PredictError::NonFinite(confidence));
        }
        let species = self.codec.decode(class as i64)?;
        Ok(Prediction {
            species: species.to_string(),
            confidence,
        })
    }
}
