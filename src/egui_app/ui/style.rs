use crate::config::TriggerColor;
use crate::egui_app::state::ToastTone;
use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub destructive: Color32,
    pub success: Color32,
    pub backdrop: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        bg_tertiary: Color32::from_rgb(42, 44, 48),
        panel_outline: Color32::from_rgb(38, 42, 48),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent: Color32::from_rgb(167, 217, 255),
        destructive: Color32::from_rgb(225, 29, 72),
        success: Color32::from_rgb(102, 176, 136),
        backdrop: Color32::from_rgba_premultiplied(0, 0, 0, 160),
    }
}

/// Apply the widget palette to the modal window visuals.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.window_stroke = Stroke::new(1.0, palette.panel_outline);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.destructive;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
}

/// Fill, text and outline of the trigger button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerVisuals {
    pub fill: Color32,
    pub text: Color32,
    pub stroke: Stroke,
}

pub fn trigger_visuals(color: TriggerColor) -> TriggerVisuals {
    let palette = palette();
    let (fill, text, stroke) = match color {
        TriggerColor::Default => (palette.accent, palette.bg_primary, Stroke::NONE),
        TriggerColor::Secondary => (palette.bg_tertiary, palette.text_primary, Stroke::NONE),
        TriggerColor::Destructive => (palette.destructive, Color32::WHITE, Stroke::NONE),
        TriggerColor::Outline => (
            palette.bg_primary,
            palette.text_primary,
            Stroke::new(1.0, palette.panel_outline),
        ),
        TriggerColor::Ghost => (Color32::TRANSPARENT, palette.text_primary, Stroke::NONE),
        TriggerColor::Link => (Color32::TRANSPARENT, palette.accent, Stroke::NONE),
    };
    TriggerVisuals { fill, text, stroke }
}

pub fn toast_fill(tone: ToastTone) -> Color32 {
    let palette = palette();
    match tone {
        ToastTone::Success => palette.bg_secondary,
        ToastTone::Error => palette.destructive,
    }
}

pub fn toast_accent(tone: ToastTone) -> Color32 {
    let palette = palette();
    match tone {
        ToastTone::Success => palette.success,
        ToastTone::Error => Color32::WHITE,
    }
}

pub fn error_text() -> Color32 {
    palette().destructive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destructive_trigger_uses_destructive_fill() {
        let visuals = trigger_visuals(TriggerColor::Destructive);
        assert_eq!(visuals.fill, palette().destructive);
        assert_eq!(visuals.text, Color32::WHITE);
    }

    #[test]
    fn outline_trigger_is_the_only_stroked_variant() {
        let stroked: Vec<TriggerColor> = [
            TriggerColor::Default,
            TriggerColor::Secondary,
            TriggerColor::Destructive,
            TriggerColor::Outline,
            TriggerColor::Ghost,
            TriggerColor::Link,
        ]
        .into_iter()
        .filter(|color| trigger_visuals(*color).stroke != Stroke::NONE)
        .collect();
        assert_eq!(stroked, vec![TriggerColor::Outline]);
    }
}
