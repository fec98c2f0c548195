use crate::dataset::Measurements;
use crate::ml::SpeciesPredictor;

use super::{GateRecord, SessionState};

/// Recompute the prediction only when the inputs or the model changed.
///
/// Inputs are compared componentwise with exact float equality. A model
/// failure is stored as an absent prediction rather than returned.
pub fn advance(
    prior: SessionState,
    inputs: Measurements,
    model: &dyn SpeciesPredictor,
) -> SessionState {
    let algorithm = model.algorithm();
    if let Some(record) = &prior.last
        && record.inputs == inputs
        && record.algorithm == algorithm
    {
        return prior;
    }

    let prediction = match model.predict(&inputs) {
        Ok(prediction) => {
            tracing::debug!(
                %algorithm,
                species = %prediction.species,
                confidence = prediction.confidence,
                "Prediction recomputed"
            );
            Some(prediction)
        }
        Err(err) => {
            tracing::debug!(%algorithm, ?inputs, "No prediction: {err}");
            None
        }
    };
    SessionState {
        last: Some(GateRecord {
            inputs,
            algorithm,
            prediction,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{Algorithm, DecodeError, PredictError, Prediction};
    use std::cell::Cell;

    struct SpyModel {
        algorithm: Algorithm,
        calls: Cell<usize>,
        fail: bool,
    }

    impl SpyModel {
        fn new(algorithm: Algorithm) -> Self {
            Self {
                algorithm,
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Algorithm::LinearRegression)
            }
        }
    }

    impl SpeciesPredictor for SpyModel {
        fn algorithm(&self) -> Algorithm {
            self.algorithm
        }

        fn predict(&self, measurements: &Measurements) -> Result<Prediction, PredictError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(PredictError::Decode(DecodeError::OutOfRange {
                    code: 3,
                    classes: 3,
                }));
            }
            Ok(Prediction {
                species: "setosa".into(),
                confidence: measurements.sepal_length / 10.0,
            })
        }
    }

    #[test]
    fn first_frame_always_computes() {
        let model = SpyModel::new(Algorithm::LinearRegression);
        let state = advance(SessionState::default(), Measurements::default(), &model);
        assert_eq!(model.calls.get(), 1);
        assert_eq!(state.inputs(), Some(Measurements::default()));
        assert_eq!(state.prediction().unwrap().confidence, 0.5);
    }

    #[test]
    fn unchanged_inputs_do_not_recompute() {
        let model = SpyModel::new(Algorithm::LinearRegression);
        let mut state = advance(SessionState::default(), Measurements::default(), &model);
        for _ in 0..5 {
            state = advance(state, Measurements::default(), &model);
        }
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn each_changed_component_recomputes_once() {
        let model = SpyModel::new(Algorithm::LinearRegression);
        let mut state = advance(SessionState::default(), Measurements::default(), &model);
        let variants = [
            Measurements::new(5.1, 3.0, 4.0, 1.0),
            Measurements::new(5.1, 3.1, 4.0, 1.0),
            Measurements::new(5.1, 3.1, 4.1, 1.0),
            Measurements::new(5.1, 3.1, 4.1, 1.1),
        ];
        for (idx, inputs) in variants.into_iter().enumerate() {
            state = advance(state, inputs, &model);
            assert_eq!(model.calls.get(), idx + 2);
            state = advance(state, inputs, &model);
            assert_eq!(model.calls.get(), idx + 2);
            assert_eq!(state.inputs(), Some(inputs));
        }
        assert!((state.prediction().unwrap().confidence - 0.51).abs() < 1e-12);
    }

    #[test]
    fn switching_model_recomputes() {
        let linear = SpyModel::new(Algorithm::LinearRegression);
        let logistic = SpyModel::new(Algorithm::LogisticRegression);
        let state = advance(SessionState::default(), Measurements::default(), &linear);
        let state = advance(state, Measurements::default(), &logistic);
        assert_eq!(linear.calls.get(), 1);
        assert_eq!(logistic.calls.get(), 1);
        assert_eq!(
            state.last.as_ref().map(|record| record.algorithm),
            Some(Algorithm::LogisticRegression)
        );
    }

    #[test]
    fn failure_is_stored_as_absent_and_not_retried() {
        let model = SpyModel::failing();
        let state = advance(SessionState::default(), Measurements::default(), &model);
        assert!(state.last.is_some());
        assert!(state.prediction().is_none());
        let state = advance(state, Measurements::default(), &model);
        assert_eq!(model.calls.get(), 1);
        assert!(state.prediction().is_none());
    }

    #[test]
    fn failure_replaces_a_previous_prediction() {
        let ok = SpyModel::new(Algorithm::LinearRegression);
        let state = advance(SessionState::default(), Measurements::default(), &ok);
        assert!(state.prediction().is_some());
        let failing = SpyModel::failing();
        let state = advance(state, Measurements::new(9.9, 9.9, 9.9, 9.9), &failing);
        assert!(state.prediction().is_none());
    }
}
