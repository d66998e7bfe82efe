use crate::app::PlanboardApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlanboardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  Project  ").font(theme::font_header()), |ui| {
            let add = ui.add_enabled(
                !app.read_only,
                egui::Button::new(format!("{}  Add Task...", egui_phosphor::regular::PLUS)),
            );
            if add.clicked() {
                app.show_add_task = true;
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Team & Holidays...", egui_phosphor::regular::USERS))
                .clicked()
            {
                app.show_team = true;
                ui.close_menu();
            }
            ui.separator();
            if ui
                .button(format!(
                    "{}  Copy Snapshot (JSON)",
                    egui_phosphor::regular::CLIPBOARD
                ))
                .clicked()
            {
                app.copy_snapshot(ui.ctx());
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Capture Image", egui_phosphor::regular::CAMERA))
                .clicked()
            {
                app.request_capture(ui.ctx());
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_header()), |ui| {
            let mut read_only = app.read_only;
            if ui
                .checkbox(&mut read_only, "Read-only mode")
                .on_hover_text("Viewing only: dragging and editing are disabled")
                .changed()
            {
                app.set_read_only(read_only);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_header()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned board name and mode badge
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&app.board.name).size(11.0).weak());
            if app.read_only {
                ui.label(
                    RichText::new(format!("{} read-only", egui_phosphor::regular::LOCK))
                        .size(11.0)
                        .color(theme::ACCENT),
                );
            }
        });
    });
}
