//! One-shot training of every offered model against the full table.

use thiserror::Error;

use crate::config::ModelSettings;
use crate::dataset::IrisTable;

use super::logreg::{TrainDataset, train_logreg};
use super::metrics::training_confusion;
use super::{
    Algorithm, DecodeError, LabelCodec, LinearSpeciesModel, LogisticSpeciesModel,
    SpeciesPredictor,
};

/// Failure while fitting a model at startup.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The table held fewer than two species.
    #[error("Need at least two species to train, found {0}")]
    TooFewClasses(usize),
    /// A training label could not be encoded.
    #[error(transparent)]
    Label(#[from] DecodeError),
    /// `linfa-linear` could not solve the least-squares problem.
    #[error("Linear regression fit failed: {0}")]
    Linear(#[from] linfa_linear::LinearError<f64>),
    /// The classifier trainer rejected the data or diverged.
    #[error("Logistic regression fit failed: {0}")]
    Logistic(String),
}

/// Codec plus every fitted model, immutable after training.
#[derive(Debug)]
pub struct TrainedModels {
    codec: LabelCodec,
    linear: LinearSpeciesModel,
    logistic: Option<LogisticSpeciesModel>,
}

impl TrainedModels {
    /// Fit the codec and the models enabled by `settings` on every row.
    pub fn train(table: &IrisTable, settings: &ModelSettings) -> Result<Self, TrainError> {
        let codec = LabelCodec::fit(table.species());
        if codec.len() < 2 {
            return Err(TrainError::TooFewClasses(codec.len()));
        }
        tracing::info!(classes = ?codec.labels(), rows = table.len(), "Training models");

        let linear = LinearSpeciesModel::train(table, &codec)?;
        log_fit(&linear, table, &codec);

        let logistic = if settings.offer_classifier {
            let dataset = TrainDataset {
                classes: codec.labels().to_vec(),
                x: table
                    .records()
                    .iter()
                    .map(|record| record.measurements.to_array())
                    .collect(),
                y: table
                    .species()
                    .map(|label| codec.encode(label))
                    .collect::<Result<_, _>>()?,
            };
            let model = train_logreg(&dataset, &settings.logistic).map_err(TrainError::Logistic)?;
            let model = LogisticSpeciesModel::new(model, codec.clone());
            log_fit(&model, table, &codec);
            Some(model)
        } else {
            None
        };

        Ok(Self {
            codec,
            linear,
            logistic,
        })
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn linear(&self) -> &LinearSpeciesModel {
        &self.linear
    }

    pub fn logistic(&self) -> Option<&LogisticSpeciesModel> {
        self.logistic.as_ref()
    }

    /// Algorithms that have a trained model.
    pub fn available(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|&algorithm| self.get(algorithm).is_some())
            .collect()
    }

    /// Model for `algorithm`, if it was trained.
    pub fn get(&self, algorithm: Algorithm) -> Option<&dyn SpeciesPredictor> {
        match algorithm {
            Algorithm::LinearRegression => Some(&self.linear as &dyn SpeciesPredictor),
            Algorithm::LogisticRegression => self
                .logistic
                .as_ref()
                .map(|model| model as &dyn SpeciesPredictor),
        }
    }
}

fn log_fit(model: &dyn SpeciesPredictor, table: &IrisTable, codec: &LabelCodec) {
    let cm = training_confusion(model, table, codec);
    tracing::info!(
        algorithm = %model.algorithm(),
        accuracy = cm.accuracy(),
        unpredicted = cm.unpredicted,
        "Model fitted (training-set accuracy)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Measurements, parse_table};

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

    #[test]
    fn trains_both_models_by_default() {
        let table = parse_table(CLUSTERS.as_bytes()).unwrap();
        let models = TrainedModels::train(&table, &ModelSettings::default()).unwrap();
        assert_eq!(
            models.available(),
            vec![Algorithm::LinearRegression, Algorithm::LogisticRegression]
        );
        let classifier = models.get(Algorithm::LogisticRegression).unwrap();
        let prediction = classifier
            .predict(&Measurements::new(5.0, 3.5, 1.4, 0.2))
            .unwrap();
        assert_eq!(prediction.species, "setosa");
    }

    #[test]
    fn classifier_can_be_disabled() {
        let table = parse_table(CLUSTERS.as_bytes()).unwrap();
        let settings = ModelSettings {
            offer_classifier: false,
            ..ModelSettings::default()
        };
        let models = TrainedModels::train(&table, &settings).unwrap();
        assert!(models.logistic().is_none());
        assert!(models.get(Algorithm::LogisticRegression).is_none());
        assert_eq!(models.available(), vec![Algorithm::LinearRegression]);
    }

    #[test]
    fn single_species_is_rejected() {
        let csv = "sepal_length,sepal_width,petal_length,petal_width,species\n5.1,3.5,1.4,0.2,setosa\n4.9,3.0,1.4,0.2,setosa\n";
        let table = parse_table(csv.as_bytes()).unwrap();
        let err = TrainedModels::train(&table, &ModelSettings::default()).unwrap_err();
        assert!(matches!(err, TrainError::TooFewClasses(1)));
    }
}
