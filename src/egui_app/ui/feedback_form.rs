use super::FeedbackWidget;
use super::overlay_layers::OverlayLayer;
use super::style;
use crate::feedback::FeedbackCategory;
use eframe::egui::{self, Align2, RichText};

const FORM_WIDTH: f32 = 460.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FormAction {
    None,
    Submit,
    Close,
    PickScreenshot,
    RemoveScreenshot,
}

impl FeedbackWidget {
    /// Render the feedback modal with its backdrop while the form is open.
    pub(super) fn render_feedback_form(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.form.open {
            return;
        }

        let backdrop_clicked = self.render_feedback_form_backdrop(ctx);
        self.accept_dropped_screenshot(ctx);
        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        let mut window_style = (*ctx.style()).clone();
        style::apply_visuals(&mut window_style.visuals);
        let mut open = true;
        let mut action = FormAction::None;
        let shown = egui::Window::new("Send Feedback")
            .id(egui::Id::new("feedback_form_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(FORM_WIDTH)
            .frame(egui::Frame::window(&window_style))
            .open(&mut open)
            .show(ctx, |ui| {
                action = self.render_feedback_form_body(ui);
            });
        if let Some(shown) = shown {
            ctx.move_to_top(shown.response.layer_id);
        }

        if !open || escape || backdrop_clicked {
            action = FormAction::Close;
        }
        match action {
            FormAction::None => {}
            FormAction::Close => {
                self.controller.close_feedback_form();
            }
            FormAction::Submit => {
                self.controller.submit_feedback();
            }
            FormAction::PickScreenshot => self.controller.pick_screenshot(),
            FormAction::RemoveScreenshot => self.controller.remove_screenshot(),
        }
    }

    /// Dim the host UI and swallow its input; returns whether the dimmed area was clicked.
    fn render_feedback_form_backdrop(&self, ctx: &egui::Context) -> bool {
        let rect = ctx.viewport_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            OverlayLayer::Modal.order(),
            egui::Id::new("feedback_form_backdrop_paint"),
        ));
        painter.rect_filled(rect, 0.0, style::palette().backdrop);
        egui::Area::new(egui::Id::new("feedback_form_backdrop_blocker"))
            .order(OverlayLayer::Modal.order())
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                ui.allocate_rect(rect, egui::Sense::click_and_drag())
                    .clicked()
            })
            .inner
    }

    fn accept_dropped_screenshot(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.controller.attach_screenshot(&path);
        }
    }

    fn render_feedback_form_body(&mut self, ui: &mut egui::Ui) -> FormAction {
        let palette = style::palette();
        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        ui.set_min_width(FORM_WIDTH);
        let mut action = FormAction::None;
        let form = &mut self.controller.ui.form;
        let editable = !form.is_submitting();

        ui.label(
            RichText::new("We'd love to hear from you. Tell us what's on your mind.")
                .color(palette.text_muted),
        );
        ui.add_space(10.0);

        ui.label(RichText::new("What kind of feedback do you have?").strong());
        ui.add_space(4.0);
        egui::Grid::new("feedback_categories")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for (index, category) in FeedbackCategory::ALL.into_iter().enumerate() {
                    ui.add_enabled_ui(editable, |ui| {
                        ui.vertical(|ui| {
                            ui.radio_value(
                                &mut form.category,
                                category,
                                format!("{} {}", category.emoji(), category.label()),
                            );
                            ui.label(
                                RichText::new(category.description())
                                    .small()
                                    .color(palette.text_muted),
                            );
                        });
                    });
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
        ui.add_space(10.0);

        let email_editable = editable && !form.email_locked();
        let email = labeled_field(
            ui,
            "Email",
            egui::TextEdit::singleline(&mut form.email).hint_text("you@example.com"),
            email_editable,
            form.errors.email,
        );
        let subject = labeled_field(
            ui,
            "Subject",
            egui::TextEdit::singleline(&mut form.subject).hint_text("Brief summary"),
            editable,
            form.errors.subject,
        );
        labeled_field(
            ui,
            "Message",
            egui::TextEdit::multiline(&mut form.message)
                .hint_text("Tell us more...")
                .desired_rows(5),
            editable,
            form.errors.message,
        );
        if form.focus_first_field_requested {
            if email_editable {
                email.request_focus();
            } else {
                subject.request_focus();
            }
            form.focus_first_field_requested = false;
        }

        ui.label(RichText::new("Screenshot (optional)").strong());
        match &form.attachment {
            Some(attachment) => {
                ui.horizontal(|ui| {
                    ui.label(format!("🖼 {}", attachment.file_name()));
                    ui.label(RichText::new(attachment.size_label()).color(palette.text_muted));
                    if ui
                        .add_enabled(editable, egui::Button::new("✕"))
                        .on_hover_text("Remove screenshot")
                        .clicked()
                    {
                        action = FormAction::RemoveScreenshot;
                    }
                });
            }
            None => {
                let prompt = if hovering_files {
                    "Drop to attach"
                } else {
                    "📎 Click to upload or drag and drop"
                };
                let button = egui::Button::new(prompt)
                    .min_size(egui::vec2(ui.available_width(), 44.0));
                if ui.add_enabled(editable, button).clicked() {
                    action = FormAction::PickScreenshot;
                }
                ui.label(
                    RichText::new("PNG, JPG or GIF up to 10 MB")
                        .small()
                        .color(palette.text_muted),
                );
            }
        }
        if let Some(error) = &form.errors.attachment {
            ui.label(RichText::new(error).small().color(style::error_text()));
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let label = if editable {
                "Send Feedback"
            } else {
                ui.spinner();
                "Sending..."
            };
            if ui
                .add_enabled(editable, egui::Button::new(label))
                .clicked()
            {
                action = FormAction::Submit;
            }
        });
        action
    }
}

fn labeled_field(
    ui: &mut egui::Ui,
    label: &str,
    edit: egui::TextEdit<'_>,
    enabled: bool,
    error: Option<&str>,
) -> egui::Response {
    ui.label(RichText::new(label).strong());
    let response = ui.add_enabled(enabled, edit.desired_width(f32::INFINITY));
    if let Some(error) = error {
        ui.label(RichText::new(error).small().color(style::error_text()));
    }
    ui.add_space(6.0);
    response
}
