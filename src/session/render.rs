use crate::ml::Prediction;

/// At or above this percentage the confidence is shown as high.
pub const HIGH_CONFIDENCE_PERCENT: f64 = 80.0;
/// Below this percentage the confidence is shown as low.
pub const LOW_CONFIDENCE_PERCENT: f64 = 50.0;

/// Color band for a confidence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTone {
    /// `>= 80%`
    Green,
    /// `[50%, 80%)`
    Orange,
    /// `< 50%`
    Red,
}

impl ConfidenceTone {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= HIGH_CONFIDENCE_PERCENT {
            ConfidenceTone::Green
        } else if percent < LOW_CONFIDENCE_PERCENT {
            ConfidenceTone::Red
        } else {
            ConfidenceTone::Orange
        }
    }
}

/// Display-ready prediction line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrediction {
    /// Species name with a capitalized first letter.
    pub species: String,
    pub confidence_percent: f64,
    pub tone: ConfidenceTone,
}

impl RenderedPrediction {
    pub fn headline(&self) -> String {
        format!("Predicted Species: {}", self.species)
    }

    /// Percentage with two decimals, in parentheses.
    pub fn confidence_text(&self) -> String {
        format!("({:.2}%)", self.confidence_percent)
    }
}

/// Format the last prediction; nothing is rendered when it is absent.
pub fn render(prediction: Option<&Prediction>) -> Option<RenderedPrediction> {
    let prediction = prediction?;
    if prediction.species.is_empty() {
        return None;
    }
    let confidence_percent = prediction.confidence * 100.0;
    Some(RenderedPrediction {
        species: capitalize_label(&prediction.species),
        confidence_percent,
        tone: ConfidenceTone::from_percent(confidence_percent),
    })
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
