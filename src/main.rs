//! Demo host embedding the feedback widget in an otherwise empty window.
use eframe::egui;
use feedbox::egui_app::FeedbackWidget;
use feedbox::{WidgetConfig, config, logging};

const DEMO_VIEWPORT_SIZE: [f32; 2] = [960.0, 640.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default()
        .unwrap_or_else(|err| {
            tracing::warn!("Using default widget config: {err}");
            WidgetConfig::default()
        })
        .with_env_overrides();
    if config.delivery_url().is_empty() {
        tracing::info!("No delivery URL configured; submissions will be simulated");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(DEMO_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Feedbox",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DemoApp::new(config)))),
    )?;
    Ok(())
}

/// Host application with a placeholder page and the widget on top.
struct DemoApp {
    widget: FeedbackWidget,
}

impl DemoApp {
    fn new(config: WidgetConfig) -> Self {
        let widget = FeedbackWidget::new(config)
            .on_close(|| tracing::debug!("Host saw the feedback form close"));
        Self { widget }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.heading("Feedbox demo");
                ui.label("Use the button in the corner to send feedback.");
            });
        });
        self.widget.show(ctx);
    }
}
