//! Library exports for reuse in benchmarks and tests.
/// Application directory resolution.
pub mod app_dirs;
/// Optional user configuration.
pub mod config;
/// Iris dataset download, parsing and process-wide caching.
pub mod dataset;
/// egui application: controller, view model and renderer.
pub mod egui_app;
/// Bounded HTTP helpers.
pub(crate) mod http_client;
/// Tracing setup.
pub mod logging;
/// Label codec and species models.
pub mod ml;
/// Change-gated prediction state and its rendering.
pub mod session;
