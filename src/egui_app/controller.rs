//! Prediction session controller: owns the trained models and the per-window
//! session state, and turns each frame's inputs into a [`ViewModel`].

use std::sync::Arc;

use crate::config::AppSettings;
use crate::dataset::{self, IrisTable, LoadError, Measurements};
use crate::egui_app::view_model::{ReadyView, ViewModel};
use crate::ml::{Algorithm, TrainedModels};
use crate::session::{self, SessionState};

enum Startup {
    Ready {
        models: TrainedModels,
        session: SessionState,
    },
    Unavailable(String),
}

/// Bridges the dataset, models and session state to the egui renderer.
pub struct PredictionController {
    settings: AppSettings,
    startup: Startup,
}

impl PredictionController {
    /// Load the dataset (once per process) and train every offered model.
    ///
    /// Blocks on the first call while the dataset downloads.
    pub fn start(settings: AppSettings) -> Self {
        let loaded = dataset::load_dataset(&settings.dataset);
        Self::from_load_result(settings, loaded)
    }

    /// Build a controller from an already obtained load result.
    pub fn from_load_result(
        settings: AppSettings,
        loaded: Result<Arc<IrisTable>, LoadError>,
    ) -> Self {
        let startup = match loaded {
            Ok(table) => match TrainedModels::train(&table, &settings.model) {
                Ok(models) => Startup::Ready {
                    models,
                    session: SessionState::default(),
                },
                Err(err) => {
                    tracing::warn!("Model training failed: {err}");
                    Startup::Unavailable(err.to_string())
                }
            },
            Err(err) => Startup::Unavailable(err.to_string()),
        };
        Self { settings, startup }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.startup, Startup::Ready { .. })
    }

    /// Algorithm selected when the window opens.
    pub fn default_algorithm(&self) -> Algorithm {
        self.resolve(self.settings.model.default_algorithm)
    }

    /// Algorithms with a trained model, in display order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match &self.startup {
            Startup::Ready { models, .. } => models.available(),
            Startup::Unavailable(_) => Vec::new(),
        }
    }

    /// Session state, when models are ready.
    pub fn session(&self) -> Option<&SessionState> {
        match &self.startup {
            Startup::Ready { session, .. } => Some(session),
            Startup::Unavailable(_) => None,
        }
    }

    /// Run one frame: gate the prediction on changed inputs and render it.
    pub fn frame(&mut self, inputs: Measurements, algorithm: Algorithm) -> ViewModel {
        let algorithm = self.resolve(algorithm);
        let (models, state) = match &mut self.startup {
            Startup::Ready { models, session } => (models, session),
            Startup::Unavailable(detail) => return ViewModel::warning(detail.clone()),
        };
        let Some(model) = models.get(algorithm) else {
            return ViewModel::warning(format!("No trained model for {algorithm}"));
        };
        *state = session::advance(std::mem::take(state), inputs.clamped(), model);
        ViewModel::Ready(ReadyView {
            algorithm,
            prediction: session::render(state.prediction()),
        })
    }

    /// Fall back to linear regression when `requested` has no trained model.
    fn resolve(&self, requested: Algorithm) -> Algorithm {
        match &self.startup {
            Startup::Ready { models, .. } if models.get(requested).is_some() => requested,
            _ => Algorithm::LinearRegression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelSettings;
    use crate::dataset::parse_table;
    use crate::egui_app::view_model::LOAD_WARNING;

    const CLUSTERS: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.0,3.4,1.5,0.2,setosa
4.9,3.0,1.4,0.2,setosa
5.2,3.6,1.3,0.3,setosa
6.0,2.8,4.3,1.3,versicolor
5.8,2.7,4.1,1.0,versicolor
6.2,2.9,4.5,1.5,versicolor
6.7,3.1,5.8,2.2,virginica
6.4,2.9,5.6,2.0,virginica
7.0,3.2,6.1,2.4,virginica
";

    fn ready(settings: AppSettings) -> PredictionController {
        let table = parse_table(CLUSTERS.as_bytes()).unwrap();
        PredictionController::from_load_result(settings, Ok(Arc::new(table)))
    }

    #[test]
    fn load_failure_only_shows_warning() {
        let mut controller = PredictionController::from_load_result(
            AppSettings::default(),
            Err(LoadError::Fetch {
                url: "https://example.invalid/iris.csv".into(),
                message: "connection refused".into(),
            }),
        );
        assert!(!controller.is_ready());
        assert!(controller.algorithms().is_empty());
        let view = controller.frame(Measurements::default(), Algorithm::LinearRegression);
        match view {
            ViewModel::Warning { message, detail } => {
                assert_eq!(message, LOAD_WARNING);
                assert!(detail.contains("connection refused"));
            }
            other => panic!("expected warning, got {other:?}"),
        }
        assert!(controller.session().is_none());
    }

    #[test]
    fn frame_records_inputs_and_renders() {
        let mut controller = ready(AppSettings::default());
        let inputs = Measurements::new(5.0, 3.4, 1.5, 0.2);
        let view = controller.frame(inputs, Algorithm::LogisticRegression);
        let ViewModel::Ready(view) = view else {
            panic!("expected ready view");
        };
        assert_eq!(view.algorithm, Algorithm::LogisticRegression);
        assert_eq!(controller.algorithms().len(), 2);
        assert_eq!(view.prediction.unwrap().species, "Setosa");
        assert_eq!(controller.session().unwrap().inputs(), Some(inputs));
    }

    #[test]
    fn inputs_are_clamped_before_prediction() {
        let mut controller = ready(AppSettings::default());
        controller.frame(Measurements::new(12.0, -1.0, 4.0, 1.0), Algorithm::LinearRegression);
        assert_eq!(
            controller.session().unwrap().inputs(),
            Some(Measurements::new(10.0, 0.0, 4.0, 1.0))
        );
    }

    #[test]
    fn disabled_classifier_falls_back_to_linear() {
        let settings = AppSettings {
            model: ModelSettings {
                offer_classifier: false,
                ..ModelSettings::default()
            },
            ..AppSettings::default()
        };
        let mut controller = ready(settings);
        assert_eq!(controller.algorithms(), vec![Algorithm::LinearRegression]);
        let view = controller.frame(Measurements::default(), Algorithm::LogisticRegression);
        let ViewModel::Ready(view) = view else {
            panic!("expected ready view");
        };
        assert_eq!(view.algorithm, Algorithm::LinearRegression);
    }

    #[test]
    fn default_algorithm_comes_from_settings() {
        let settings = AppSettings {
            model: ModelSettings {
                default_algorithm: Algorithm::LogisticRegression,
                ..ModelSettings::default()
            },
            ..AppSettings::default()
        };
        assert_eq!(
            ready(settings).default_algorithm(),
            Algorithm::LogisticRegression
        );
    }
}
