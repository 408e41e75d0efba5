use super::FeedbackWidget;
use super::overlay_layers::OverlayLayer;
use super::style;
use crate::config::{TriggerColor, TriggerIcon, TriggerPosition, TriggerRounding, TriggerSize};
use eframe::egui::{self, Align2, RichText, epaint::CornerRadius};

/// Distance between the trigger and the window edges.
pub(super) const TRIGGER_INSET: f32 = 24.0;

/// Pulse period of the animated trigger, in seconds.
const PULSE_PERIOD: f64 = 2.0;

pub(super) fn anchor(position: TriggerPosition) -> (Align2, egui::Vec2) {
    match position {
        TriggerPosition::BottomRight => {
            (Align2::RIGHT_BOTTOM, egui::vec2(-TRIGGER_INSET, -TRIGGER_INSET))
        }
        TriggerPosition::BottomLeft => {
            (Align2::LEFT_BOTTOM, egui::vec2(TRIGGER_INSET, -TRIGGER_INSET))
        }
        TriggerPosition::TopRight => (Align2::RIGHT_TOP, egui::vec2(-TRIGGER_INSET, TRIGGER_INSET)),
        TriggerPosition::TopLeft => (Align2::LEFT_TOP, egui::vec2(TRIGGER_INSET, TRIGGER_INSET)),
    }
}

pub(super) fn icon_glyph(icon: TriggerIcon) -> &'static str {
    match icon {
        TriggerIcon::Message => "💬",
        TriggerIcon::Help => "❓",
        TriggerIcon::Flag => "⚑",
        TriggerIcon::Alert => "⚠",
        TriggerIcon::Info => "ℹ",
    }
}

/// Button height and glyph size for a trigger size.
fn metrics(size: TriggerSize) -> (f32, f32) {
    match size {
        TriggerSize::Sm => (32.0, 14.0),
        TriggerSize::Default => (40.0, 16.0),
        TriggerSize::Lg => (44.0, 18.0),
    }
}

fn corner_radius(rounding: TriggerRounding) -> CornerRadius {
    match rounding {
        TriggerRounding::Full => CornerRadius::same(u8::MAX),
        TriggerRounding::Md => CornerRadius::same(6),
    }
}

/// Opacity multiplier of the pulse animation at `time` seconds.
fn pulse_alpha(time: f64) -> f32 {
    let phase = (time / PULSE_PERIOD * std::f64::consts::TAU).sin();
    (0.75 + 0.25 * phase) as f32
}

impl FeedbackWidget {
    pub(super) fn render_trigger(&mut self, ctx: &egui::Context) {
        let config = self.controller.config();
        let (align, offset) = anchor(config.position);
        let (height, glyph_size) = metrics(config.size);
        let visuals = style::trigger_visuals(config.color);
        let mut text = icon_glyph(config.icon).to_string();
        if config.show_label {
            text.push(' ');
            text.push_str(&config.label);
        }
        let alpha = if config.animate {
            ctx.request_repaint();
            pulse_alpha(ctx.input(|i| i.time))
        } else {
            1.0
        };
        let mut button = egui::Button::new(
            RichText::new(text)
                .size(glyph_size)
                .color(visuals.text.gamma_multiply(alpha)),
        )
        .fill(visuals.fill.gamma_multiply(alpha))
        .stroke(visuals.stroke)
        .corner_radius(corner_radius(config.rounded))
        .min_size(egui::vec2(height, height));
        if config.color == TriggerColor::Link {
            button = button.frame(false);
        }
        let clicked = egui::Area::new(egui::Id::new("feedback_trigger"))
            .order(OverlayLayer::Trigger.order())
            .anchor(align, offset)
            .show(ctx, |ui| {
                ui.add(button)
                    .on_hover_text("Send feedback")
                    .clicked()
            })
            .inner;
        if clicked {
            self.controller.open_feedback_form();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_keep_the_trigger_inside_the_window() {
        let (align, offset) = anchor(TriggerPosition::BottomRight);
        assert_eq!(align, Align2::RIGHT_BOTTOM);
        assert!(offset.x < 0.0 && offset.y < 0.0);
        let (align, offset) = anchor(TriggerPosition::TopLeft);
        assert_eq!(align, Align2::LEFT_TOP);
        assert!(offset.x > 0.0 && offset.y > 0.0);
    }

    #[test]
    fn every_icon_has_a_glyph() {
        for icon in [
            TriggerIcon::Message,
            TriggerIcon::Help,
            TriggerIcon::Flag,
            TriggerIcon::Alert,
            TriggerIcon::Info,
        ] {
            assert!(!icon_glyph(icon).is_empty());
        }
    }

    #[test]
    fn larger_sizes_are_taller() {
        assert!(metrics(TriggerSize::Sm).0 < metrics(TriggerSize::Default).0);
        assert!(metrics(TriggerSize::Default).0 < metrics(TriggerSize::Lg).0);
    }

    #[test]
    fn pulse_stays_visible() {
        for step in 0..20 {
            let alpha = pulse_alpha(step as f64 * 0.1);
            assert!((0.5..=1.0).contains(&alpha));
        }
    }
}
