//! egui renderer for the prediction window.

pub mod style;

use eframe::egui::{self, DragValue, RichText, Ui};

use crate::config;
use crate::dataset::{MAX_MEASUREMENT, MIN_MEASUREMENT, Measurements};
use crate::egui_app::controller::PredictionController;
use crate::egui_app::view_model::ViewModel;
use crate::ml::Algorithm;
use crate::session::RenderedPrediction;

/// Window heading.
pub const TITLE: &str = "Iris Flower Species Prediction";
/// Smallest window size that keeps both input columns readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(420.0, 320.0);

const PROMPT: &str = "Enter the measurements of the Iris flower:";
const FIELD_LABELS: [&str; 4] = [
    "Sepal Length (cm)",
    "Sepal Width (cm)",
    "Petal Length (cm)",
    "Petal Width (cm)",
];

/// Renders the prediction UI on top of a [`PredictionController`].
pub struct IrisApp {
    controller: PredictionController,
    inputs: Measurements,
    algorithm: Algorithm,
    visuals_set: bool,
}

impl IrisApp {
    /// Load configuration, fetch the dataset and train the models.
    pub fn new() -> Result<Self, String> {
        let settings =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(PredictionController::start(settings)))
    }

    pub fn with_controller(controller: PredictionController) -> Self {
        let algorithm = controller.default_algorithm();
        Self {
            controller,
            inputs: Measurements::default(),
            algorithm,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_inputs(&mut self, ui: &mut Ui) {
        ui.label(PROMPT);
        ui.add_space(4.0);
        let [sepal_length, sepal_width, petal_length, petal_width] = self.inputs.fields_mut();
        let [sepal_label, sepal_width_label, petal_label, petal_width_label] = FIELD_LABELS;
        ui.columns(2, |columns| {
            measurement_field(&mut columns[0], sepal_label, sepal_length);
            measurement_field(&mut columns[0], sepal_width_label, sepal_width);
            measurement_field(&mut columns[1], petal_label, petal_length);
            measurement_field(&mut columns[1], petal_width_label, petal_width);
        });
    }

    fn render_algorithm_choice(&mut self, ui: &mut Ui, algorithms: &[Algorithm]) {
        if algorithms.len() < 2 {
            return;
        }
        ui.horizontal(|ui| {
            ui.label("Model:");
            for &algorithm in algorithms {
                ui.radio_value(&mut self.algorithm, algorithm, algorithm.label());
            }
        });
    }

    /// Draw one pass. The controls run before the controller so the
    /// prediction matches the values they committed in this pass.
    fn show(&mut self, ui: &mut Ui) -> ViewModel {
        ui.heading(TITLE);
        if self.controller.is_ready() {
            let palette = style::palette();
            let algorithms = self.controller.algorithms();
            self.render_algorithm_choice(ui, &algorithms);
            ui.label(RichText::new(self.algorithm.description()).color(palette.text_muted));
            ui.add_space(8.0);
            self.render_inputs(ui);
            ui.add_space(12.0);
        }
        let view = self.controller.frame(self.inputs, self.algorithm);
        match &view {
            ViewModel::Warning { message, detail } => render_warning(ui, message, detail),
            ViewModel::Ready(ready) => {
                self.algorithm = ready.algorithm;
                if let Some(prediction) = &ready.prediction {
                    render_prediction(ui, prediction);
                }
            }
        }
        view
    }
}

impl eframe::App for IrisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show(ui);
        });
    }
}

fn measurement_field(ui: &mut Ui, label: &str, value: &mut f64) {
    ui.label(label);
    ui.add(
        DragValue::new(value)
            .range(MIN_MEASUREMENT..=MAX_MEASUREMENT)
            .speed(0.1)
            .fixed_decimals(1)
            .suffix(" cm"),
    );
    ui.add_space(4.0);
}

fn render_prediction(ui: &mut Ui, prediction: &RenderedPrediction) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(prediction.headline()).strong().size(18.0));
        ui.label(
            RichText::new(prediction.confidence_text())
                .color(style::tone_color(prediction.tone))
                .size(18.0),
        );
    });
}

fn render_warning(ui: &mut Ui, message: &str, detail: &str) {
    let palette = style::palette();
    ui.add_space(8.0);
    ui.label(RichText::new(message).color(palette.warning).strong());
    if !detail.is_empty() {
        ui.label(RichText::new(detail).color(palette.text_muted).small());
    }
}
