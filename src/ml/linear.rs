//! Least-squares regression on the encoded species label.
//!
//! The class code is treated as a continuous target. A prediction is rounded
//! to the nearest code (ties to even) without clamping, so extreme inputs can
//! land outside the codec and surface as a [`DecodeError`](super::DecodeError).

use std::fmt;

use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2};

use crate::dataset::{IrisTable, Measurements};

use super::{Algorithm, LabelCodec, PredictError, Prediction, SpeciesPredictor, TrainError};

/// Ordinary least squares fitted by `linfa-linear`.
pub struct LinearSpeciesModel {
    fitted: FittedLinearRegression<f64>,
    codec: LabelCodec,
}

impl fmt::Debug for LinearSpeciesModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearSpeciesModel")
            .field("intercept", &self.fitted.intercept())
            .field("params", self.fitted.params())
            .field("codec", &self.codec)
            .finish()
    }
}

impl LinearSpeciesModel {
    /// Fit against every row of `table`, using `codec` codes as targets.
    pub fn train(table: &IrisTable, codec: &LabelCodec) -> Result<Self, TrainError> {
        let targets = table
            .species()
            .map(|label| codec.encode(label).map(|code| code as f64))
            .collect::<Result<Array1<f64>, _>>()?;
        let dataset = Dataset::new(table.feature_matrix(), targets);
        let fitted = LinearRegression::default().fit(&dataset)?;
        tracing::debug!(
            intercept = fitted.intercept(),
            params = ?fitted.params(),
            "Linear regression fitted"
        );
        Ok(Self {
            fitted,
            codec: codec.clone(),
        })
    }

    /// Unrounded model output for one input row.
    pub fn predict_raw(&self, measurements: &Measurements) -> Result<f64, PredictError> {
        let row = Array2::from_shape_vec((1, 4), measurements.to_array().to_vec())
            .map_err(|err| PredictError::Linfa(err.to_string()))?;
        let output: Array1<f64> = self.fitted.predict(&row);
        output
            .first()
            .copied()
            .ok_or_else(|| PredictError::Linfa("empty prediction".to_string()))
    }
}

/// Map a raw regression output to a species and a heuristic confidence.
///
/// Confidence is `1 - |raw - class|`: how close the output sits to the
/// rounded class. It is not a calibrated probability.
pub fn classify_raw(raw: f64, codec: &LabelCodec) -> Result<Prediction, PredictError> {
    if !raw.is_finite() {
        return Err(PredictError::NonFinite(raw));
    }
    let class = raw.round_ties_even();
    let species = codec.decode(class as i64)?;
    Ok(Prediction {
        species: species.to_string(),
        confidence: 1.0 - (raw - class).abs(),
    })
}

impl SpeciesPredictor for LinearSpeciesModel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LinearRegression
    }

    fn predict(&self, measurements: &Measurements) -> Result<Prediction, PredictError> {
        let raw = self.predict_raw(measurements)?;
        classify_raw(raw, &self.codec)
    }
}
