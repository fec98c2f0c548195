use ndarray::Array2;
use serde::Deserialize;

use super::LoadError;

/// Feature column names in model input order.
pub const FEATURE_COLUMNS: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Lower bound accepted for a single measurement in centimetres.
pub const MIN_MEASUREMENT: f64 = 0.0;
/// Upper bound accepted for a single measurement in centimetres.
pub const MAX_MEASUREMENT: f64 = 10.0;

/// Four flower measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Default for Measurements {
    fn default() -> Self {
        Self::new(5.0, 3.0, 4.0, 1.0)
    }
}

impl Measurements {
    pub const fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    /// Values in `FEATURE_COLUMNS` order.
    pub fn to_array(self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// Clamp every value into the accepted input range.
    pub fn clamped(self) -> Self {
        let clamp = |value: f64| value.clamp(MIN_MEASUREMENT, MAX_MEASUREMENT);
        Self::new(
            clamp(self.sepal_length),
            clamp(self.sepal_width),
            clamp(self.petal_length),
            clamp(self.petal_width),
        )
    }

    /// Mutable references in `FEATURE_COLUMNS` order, for input widgets.
    pub fn fields_mut(&mut self) -> [&mut f64; 4] {
        [
            &mut self.sepal_length,
            &mut self.sepal_width,
            &mut self.petal_length,
            &mut self.petal_width,
        ]
    }
}

/// One labelled row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IrisRecord {
    pub measurements: Measurements,
    pub species: String,
}

/// CSV row shape; `csv` cannot deserialize numbers through `#[serde(flatten)]`.
#[derive(Deserialize)]
struct CsvRow {
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    species: String,
}

impl From<CsvRow> for IrisRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            measurements: Measurements::new(
                row.sepal_length,
                row.sepal_width,
                row.petal_length,
                row.petal_width,
            ),
            species: row.species,
        }
    }
}

/// Immutable in-memory Iris table.
#[derive(Debug, Clone, PartialEq)]
pub struct IrisTable {
    records: Vec<IrisRecord>,
}

impl IrisTable {
    /// Build a table from records, rejecting an empty set.
    pub fn new(records: Vec<IrisRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[IrisRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Species column in row order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.species.as_str())
    }

    /// Feature matrix with one row per record and columns in `FEATURE_COLUMNS` order.
    pub fn feature_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.records.len(), FEATURE_COLUMNS.len()), |(row, col)| {
            self.records[row].measurements.to_array()[col]
        })
    }
}

/// Parse CSV bytes with a header row into a table.
///
/// Columns are matched by header name; extra columns are ignored.
pub fn parse_table(bytes: &[u8]) -> Result<IrisTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let records = reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(IrisRecord::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| LoadError::Parse(err.to_string()))?;
    IrisTable::new(records)
}
