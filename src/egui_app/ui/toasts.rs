use super::FeedbackWidget;
use super::overlay_layers::OverlayLayer;
use super::style;
use super::trigger::{self, TRIGGER_INSET};
use crate::config::TriggerPosition;
use eframe::egui::{self, Align2, RichText};

const TOAST_WIDTH: f32 = 300.0;

/// Notifications go to the vertical corner opposite the trigger.
fn toast_anchor(position: TriggerPosition) -> (Align2, egui::Vec2) {
    let (trigger_align, trigger_offset) = trigger::anchor(position);
    let (vertical, dy) = if position.is_bottom() {
        (egui::Align::Min, TRIGGER_INSET)
    } else {
        (egui::Align::Max, -TRIGGER_INSET)
    };
    (
        Align2([trigger_align.x(), vertical]),
        egui::vec2(trigger_offset.x, dy),
    )
}

impl FeedbackWidget {
    pub(super) fn render_toasts(&mut self, ctx: &egui::Context) {
        if self.controller.ui.toasts.is_empty() {
            return;
        }
        let (align, offset) = toast_anchor(self.controller.config().position);
        let mut dismissed = None;
        egui::Area::new(egui::Id::new("feedback_toasts"))
            .order(OverlayLayer::Notifications.order())
            .anchor(align, offset)
            .show(ctx, |ui| {
                ui.set_width(TOAST_WIDTH);
                for (index, toast) in self.controller.ui.toasts.iter().enumerate() {
                    egui::Frame::new()
                        .fill(style::toast_fill(toast.tone))
                        .stroke(egui::Stroke::new(1.0, style::palette().panel_outline))
                        .corner_radius(6)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.set_width(TOAST_WIDTH);
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        RichText::new(&toast.title)
                                            .strong()
                                            .color(style::toast_accent(toast.tone)),
                                    );
                                    ui.label(&toast.description);
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::TOP),
                                    |ui| {
                                        if ui.small_button("✕").clicked() {
                                            dismissed = Some(index);
                                        }
                                    },
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });
        if let Some(index) = dismissed {
            self.controller.dismiss_toast(index);
        }
    }
}
