use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};
use serde::Deserialize;

use super::{FEATURE_DIM, FeatureScaling, LogRegModel};
use crate::ml::softmax;

/// Mini-batch gradient descent settings for the classifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.1,
            l2: 1e-4,
            batch_size: 16,
            seed: 42,
        }
    }
}

impl TrainOptions {
    /// Clamp options to values the trainer can use.
    pub fn normalized(mut self) -> Self {
        self.batch_size = self.batch_size.max(1);
        self.epochs = self.epochs.max(1);
        if !self.l2.is_finite() || self.l2 < 0.0 {
            self.l2 = 0.0;
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            self.learning_rate = Self::default().learning_rate;
        }
        self
    }
}

/// In-memory training set: raw feature rows with class indices.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub classes: Vec<String>,
    pub x: Vec<[f64; FEATURE_DIM]>,
    pub y: Vec<usize>,
}

/// Fit a softmax classifier on standardized features.
pub fn train_logreg(dataset: &TrainDataset, options: &TrainOptions) -> Result<LogRegModel, String> {
    if dataset.x.is_empty() {
        return Err("Empty training set".to_string());
    }
    if dataset.x.len() != dataset.y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let classes = dataset.classes.len();
    if classes == 0 {
        return Err("No classes available for training".to_string());
    }
    if let Some(&bad) = dataset.y.iter().find(|&&y| y >= classes) {
        return Err(format!("Label {bad} out of range for {classes} classes"));
    }

    let options = options.clone().normalized();
    let scaling = FeatureScaling::fit(&dataset.x);
    let scaled: Vec<[f64; FEATURE_DIM]> = dataset.x.iter().map(|row| scaling.apply(row)).collect();

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights: Vec<f64> = (0..classes * FEATURE_DIM)
        .map(|_| (rng.random::<f64>() - 0.5) * 0.01)
        .collect();
    let mut bias = vec![0.0f64; classes];
    let mut indices: Vec<usize> = (0..scaled.len()).collect();
    let lr = options.learning_rate;

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(options.batch_size) {
            let mut grad_w = vec![0.0f64; weights.len()];
            let mut grad_b = vec![0.0f64; classes];
            for &idx in chunk {
                let x = &scaled[idx];
                let y = dataset.y[idx];
                let logits: Vec<f64> = (0..classes)
                    .map(|c| {
                        let base = c * FEATURE_DIM;
                        bias[c] + (0..FEATURE_DIM).map(|i| weights[base + i] * x[i]).sum::<f64>()
                    })
                    .collect();
                let probs = softmax(&logits);
                for c in 0..classes {
                    let diff = probs[c] - if c == y { 1.0 } else { 0.0 };
                    let base = c * FEATURE_DIM;
                    for i in 0..FEATURE_DIM {
                        grad_w[base + i] += diff * x[i];
                    }
                    grad_b[c] += diff;
                }
            }
            let inv = 1.0 / chunk.len() as f64;
            for (idx, w) in weights.iter_mut().enumerate() {
                *w -= lr * (grad_w[idx] * inv + options.l2 * *w);
            }
            for (b, g) in bias.iter_mut().zip(&grad_b) {
                *b -= lr * g * inv;
            }
        }
    }

    let model = LogRegModel {
        classes: dataset.classes.clone(),
        weights,
        bias,
        scaling,
    };
    model.validate()?;
    Ok(model)
}
