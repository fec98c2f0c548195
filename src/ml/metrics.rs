//! Resubstitution metrics logged after training.

use crate::dataset::IrisTable;

use super::{LabelCodec, SpeciesPredictor};

/// Confusion matrix for a `K`-class classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Number of classes.
    pub n_classes: usize,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
    /// Rows where the model produced no usable class.
    pub unpredicted: u32,
}

impl ConfusionMatrix {
    /// Create an empty `KxK` confusion matrix.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
            unpredicted: 0,
        }
    }

    /// Count one outcome. `None` marks a prediction that produced no class.
    pub fn add(&mut self, truth: usize, predicted: Option<usize>) {
        let Some(predicted) = predicted else {
            self.unpredicted = self.unpredicted.saturating_add(1);
            return;
        };
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    /// Fraction of all counted rows (unpredicted included) on the diagonal.
    pub fn accuracy(&self) -> f64 {
        let correct: u64 = (0..self.n_classes)
            .map(|class| u64::from(self.get(class, class)))
            .sum();
        let total: u64 = self.counts.iter().map(|&v| u64::from(v)).sum::<u64>()
            + u64::from(self.unpredicted);
        if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        }
    }
}

/// Score `model` on the rows it was trained on.
///
/// This is an in-sample fit figure for the log, not a held-out evaluation.
pub fn training_confusion(
    model: &dyn SpeciesPredictor,
    table: &IrisTable,
    codec: &LabelCodec,
) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::new(codec.len());
    for record in table.records() {
        let Ok(truth) = codec.encode(&record.species) else {
            continue;
        };
        let predicted = model
            .predict(&record.measurements)
            .ok()
            .and_then(|prediction| codec.encode(&prediction.species).ok());
        cm.add(truth, predicted);
    }
    cm
}
