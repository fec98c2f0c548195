/// Prediction session controller.
pub mod controller;
/// egui rendering.
pub mod ui;
/// Per-frame display snapshot.
pub mod view_model;
