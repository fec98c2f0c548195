//! Bijection between species names and small integer codes.

use std::collections::BTreeSet;

use thiserror::Error;

/// Failure to map between a species name and its code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The label was not seen when the codec was fitted.
    #[error("Unknown species label {0:?}")]
    UnknownLabel(String),
    /// The code lies outside `0..classes`.
    #[error("Class code {code} is outside 0..{classes}")]
    OutOfRange { code: i64, classes: usize },
}

/// Sorted distinct labels; a label's code is its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCodec {
    labels: Vec<String>,
}

impl LabelCodec {
    /// Fit the codec from every observed label. Order is lexicographic.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        Self {
            labels: distinct.into_iter().collect(),
        }
    }

    pub fn encode(&self, label: &str) -> Result<usize, DecodeError> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .map_err(|_| DecodeError::UnknownLabel(label.to_string()))
    }

    pub fn decode(&self, code: i64) -> Result<&str, DecodeError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
            .ok_or(DecodeError::OutOfRange {
                code,
                classes: self.labels.len(),
            })
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
