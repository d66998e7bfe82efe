use crate::model::{resolve_rows, Board, TeamMember};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use std::collections::HashSet;

/// Actions that the task table can request.
pub enum TaskTableAction {
    None,
    Select(String),
    Delete(String),
    Add,
}

/// Render the left-side task panel: every row in resolver order, so it lines
/// up one-to-one with the chart.
pub fn show_task_table(
    board: &Board,
    selected_task: Option<&str>,
    read_only: bool,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;
    let rows = resolve_rows(&board.tasks, theme::GROUP_COLORS, theme::ORPHAN_COLOR);
    let header_ids: HashSet<&str> = rows
        .iter()
        .filter(|r| r.header)
        .map(|r| board.tasks[r.index].id.as_str())
        .collect();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", board.tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    if !read_only {
        let btn = egui::Button::new(
            RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
                .color(Color32::WHITE)
                .size(12.0),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
            action = TaskTableAction::Add;
        }
        ui.add_space(6.0);
    }

    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, row) in rows.iter().enumerate() {
                let task = &board.tasks[row.index];
                let is_selected = selected_task == Some(task.id.as_str());
                // Only children of an actual header row indent; orphans sit
                // flush left like roots.
                let indented = task
                    .parent_id
                    .as_deref()
                    .is_some_and(|p| header_ids.contains(p));

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;
                        if indented {
                            ui.add_space(14.0);
                        }

                        // Group color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, row.color);

                        let name = if task.is_milestone() {
                            format!("◆ {}", task.name)
                        } else {
                            task.name.clone()
                        };
                        let mut name_text = RichText::new(name).size(12.0).color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        });
                        if row.header {
                            name_text = name_text.strong();
                        }
                        ui.add(egui::Label::new(name_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;

                                if !read_only {
                                    let del_btn = ui.add(
                                        egui::Button::new(
                                            RichText::new("✕")
                                                .size(10.0)
                                                .color(theme::TEXT_DIM),
                                        )
                                        .frame(false),
                                    );
                                    if del_btn.on_hover_text("Delete task").clicked() {
                                        action = TaskTableAction::Delete(task.id.clone());
                                    }
                                }

                                draw_assignee_badge(ui, task.assignee_id.as_deref(), &board.team);

                                // Status chip
                                let status = theme::status_color(task.status);
                                let (chip, _) = ui.allocate_exact_size(
                                    egui::vec2(8.0, 8.0),
                                    egui::Sense::hover(),
                                );
                                ui.painter().circle_filled(chip.center(), 4.0, status);

                                ui.label(
                                    RichText::new(task.end.format("%m/%d").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                                ui.label(
                                    RichText::new(task.start.format("%m/%d").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                            },
                        );
                    });
                });

                let row_rect = frame_resp.response.rect;
                let row_click = ui.interact(
                    row_rect,
                    egui::Id::new(("task-row", task.id.as_str())),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskTableAction::Select(task.id.clone());
                }

                ui.add_space(1.0);
            }
        });

    action
}

/// Initials circle for the assigned member; a dangling or empty assignment
/// renders a hollow placeholder instead.
fn draw_assignee_badge(ui: &mut Ui, assignee_id: Option<&str>, team: &[TeamMember]) {
    let r = theme::AVATAR_RADIUS;
    let (rect, resp) =
        ui.allocate_exact_size(egui::vec2(r * 2.0, r * 2.0), egui::Sense::hover());
    match assignee_id.and_then(|id| team.iter().find(|m| m.id == id)) {
        Some(member) => {
            ui.painter()
                .circle_filled(rect.center(), r, theme::BG_HEADER);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                &member.avatar,
                theme::font_small(),
                theme::TEXT_PRIMARY,
            );
            resp.on_hover_text(format!("{} · {}", member.name, member.role));
        }
        None => {
            ui.painter().circle_stroke(
                rect.center(),
                r - 1.0,
                egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
            );
        }
    }
}
