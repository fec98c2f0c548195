#[path = "support/fixture.rs"]
mod fixture;

use fixture::IRIS_SUBSET;

use iris_predict::config::ModelSettings;
use iris_predict::dataset::{Measurements, parse_table};
use iris_predict::ml::{Algorithm, SpeciesPredictor, TrainedModels};
use iris_predict::session::{self, ConfidenceTone, SessionState};

fn trained() -> TrainedModels {
    let table = parse_table(IRIS_SUBSET.as_bytes()).expect("fixture parses");
    TrainedModels::train(&table, &ModelSettings::default()).expect("models train")
}

#[test]
fn codec_orders_species_lexicographically() {
    let models = trained();
    assert_eq!(
        models.codec().labels(),
        ["setosa", "versicolor", "virginica"]
    );
}

#[test]
fn default_inputs_predict_versicolor_with_both_models() {
    let models = trained();
    let inputs = Measurements::default();

    let linear = models.linear().predict(&inputs).expect("linear prediction");
    assert_eq!(linear.species, "versicolor");
    assert!((0.5..=1.0).contains(&linear.confidence));

    let logistic = models
        .logistic()
        .expect("classifier offered by default")
        .predict(&inputs)
        .expect("logistic prediction");
    assert_eq!(logistic.species, "versicolor");
}

#[test]
fn classifier_probabilities_sum_to_one() {
    let models = trained();
    let logistic = models.logistic().expect("classifier offered by default");
    let inputs = Measurements::new(5.0, 3.0, 4.0, 1.0);
    let proba = logistic.predict_proba(&inputs);
    assert_eq!(proba.len(), 3);
    assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    let prediction = logistic.predict(&inputs).expect("prediction");
    let max = proba.iter().cloned().fold(f64::MIN, f64::max);
    assert!((prediction.confidence - max).abs() < 1e-12);
}

#[test]
fn training_rows_are_classified_by_species() {
    let models = trained();
    let setosa = Measurements::new(5.1, 3.5, 1.4, 0.2);
    let virginica = Measurements::new(7.2, 3.6, 6.1, 2.5);
    for algorithm in Algorithm::ALL {
        let model = models.get(algorithm).expect("model trained");
        assert_eq!(model.predict(&setosa).unwrap().species, "setosa");
        assert_eq!(model.predict(&virginica).unwrap().species, "virginica");
    }
}

#[test]
fn extreme_inputs_leave_no_prediction_for_linear_model() {
    let models = trained();
    let state = session::advance(
        SessionState::default(),
        Measurements::new(0.0, 10.0, 10.0, 10.0),
        models.linear(),
    );
    assert!(state.last.is_some());
    assert!(session::render(state.prediction()).is_none());
}

#[test]
fn rendered_prediction_uses_capitalized_label() {
    let models = trained();
    let state = session::advance(
        SessionState::default(),
        Measurements::new(5.1, 3.5, 1.4, 0.2),
        models.get(Algorithm::LogisticRegression).unwrap(),
    );
    let rendered = session::render(state.prediction()).expect("rendered");
    assert_eq!(rendered.headline(), "Predicted Species: Setosa");
    assert_eq!(rendered.tone, ConfidenceTone::from_percent(rendered.confidence_percent));
}
