use crate::model::{Task, TaskStatus, TaskType, TeamMember};
use crate::ui::theme;
use egui::{RichText, Ui};

/// Result of rendering the editor for the selected task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
}

fn section(ui: &mut Ui, label: &str) {
    ui.label(
        RichText::new(label)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Edit the selected task in place. The editor is a host-side CRUD form:
/// unlike the chart it writes records directly, so the app only shows it
/// when the board is not read-only.
pub fn show_task_editor(
    task: &mut Task,
    all_tasks: &[Task],
    team: &[TeamMember],
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let mut mark = |changed: bool, action: &mut EditorAction| {
        if changed {
            *action = EditorAction::Changed;
        }
    };

    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    section(ui, "Name");
    let resp = ui.add_sized(
        [ui.available_width(), 24.0],
        egui::TextEdit::singleline(&mut task.name).text_color(theme::TEXT_PRIMARY),
    );
    mark(resp.changed(), &mut action);

    ui.add_space(2.0);

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            section(ui, "Type");
            egui::ComboBox::from_id_salt(("kind", task.id.as_str()))
                .selected_text(task.kind.label())
                .show_ui(ui, |ui| {
                    for kind in TaskType::ALL {
                        if ui
                            .selectable_label(task.kind == kind, kind.label())
                            .clicked()
                        {
                            task.kind = kind;
                            if task.is_milestone() {
                                task.end = task.start;
                            }
                            action = EditorAction::Changed;
                        }
                    }
                });
        });
        ui.add_space(8.0);
        ui.vertical(|ui| {
            section(ui, "Status");
            egui::ComboBox::from_id_salt(("status", task.id.as_str()))
                .selected_text(task.status.label())
                .show_ui(ui, |ui| {
                    for status in TaskStatus::ALL {
                        if ui
                            .selectable_label(task.status == status, status.label())
                            .clicked()
                        {
                            task.status = status;
                            action = EditorAction::Changed;
                        }
                    }
                });
        });
    });

    ui.add_space(2.0);

    // ── Grouping ────────────────────────────────────────────────────────
    section(ui, "Parent");
    let candidates: Vec<(String, String)> = all_tasks
        .iter()
        .filter(|t| t.parent_id.is_none() && t.id != task.id)
        .map(|t| (t.id.clone(), t.name.clone()))
        .collect();
    let parent_label = match task.parent_id.as_deref() {
        None => "— None —".to_string(),
        Some(pid) => all_tasks
            .iter()
            .find(|t| t.id == pid)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "(missing)".to_string()),
    };
    egui::ComboBox::from_id_salt(("parent", task.id.as_str()))
        .selected_text(parent_label)
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(task.parent_id.is_none(), "— None —")
                .clicked()
            {
                task.parent_id = None;
                action = EditorAction::Changed;
            }
            for (cid, cname) in &candidates {
                if ui
                    .selectable_label(task.parent_id.as_deref() == Some(cid), cname.as_str())
                    .clicked()
                {
                    task.parent_id = Some(cid.clone());
                    action = EditorAction::Changed;
                }
            }
        });

    ui.add_space(2.0);

    section(ui, "Assignee");
    let assignee_label = match task.assignee_id.as_deref() {
        None => "— Unassigned —".to_string(),
        Some(id) => team
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "(missing)".to_string()),
    };
    egui::ComboBox::from_id_salt(("assignee", task.id.as_str()))
        .selected_text(assignee_label)
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(task.assignee_id.is_none(), "— Unassigned —")
                .clicked()
            {
                task.assignee_id = None;
                action = EditorAction::Changed;
            }
            for member in team {
                if ui
                    .selectable_label(
                        task.assignee_id.as_deref() == Some(member.id.as_str()),
                        &member.name,
                    )
                    .clicked()
                {
                    task.assignee_id = Some(member.id.clone());
                    action = EditorAction::Changed;
                }
            }
        });

    ui.add_space(2.0);

    // ── Dates ───────────────────────────────────────────────────────────
    if task.is_milestone() {
        section(ui, "Date");
        let resp = ui.add(
            egui_extras::DatePickerButton::new(&mut task.start).id_salt("dp_milestone"),
        );
        if resp.changed() {
            task.end = task.start;
            action = EditorAction::Changed;
        }
    } else {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                section(ui, "Start");
                let resp =
                    ui.add(egui_extras::DatePickerButton::new(&mut task.start).id_salt("dp_start"));
                if resp.changed() {
                    if task.start > task.end {
                        task.end = task.start;
                    }
                    action = EditorAction::Changed;
                }
            });
            ui.add_space(8.0);
            ui.vertical(|ui| {
                section(ui, "End");
                let resp =
                    ui.add(egui_extras::DatePickerButton::new(&mut task.end).id_salt("dp_end"));
                if resp.changed() {
                    if task.end < task.start {
                        task.start = task.end;
                    }
                    action = EditorAction::Changed;
                }
            });
        });
    }

    ui.add_space(2.0);

    section(ui, "Progress");
    let slider = egui::Slider::new(&mut task.progress, 0..=100).suffix("%");
    let resp = ui.add_sized([ui.available_width(), 20.0], slider);
    mark(resp.changed(), &mut action);

    ui.add_space(2.0);

    section(ui, "Hours");
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projected")
                .size(10.0)
                .color(theme::TEXT_SECONDARY),
        );
        let resp = ui.add(egui::DragValue::new(&mut task.projected_hours).range(0..=10_000));
        mark(resp.changed(), &mut action);
        ui.add_space(6.0);
        ui.label(
            RichText::new("Actual")
                .size(10.0)
                .color(theme::TEXT_SECONDARY),
        );
        let resp = ui.add(egui::DragValue::new(&mut task.actual_hours).range(0..=10_000));
        mark(resp.changed(), &mut action);
    });

    ui.add_space(2.0);

    // ── Dependencies ────────────────────────────────────────────────────
    section(ui, "Depends on");
    let mut remove: Option<usize> = None;
    for (i, dep_id) in task.dependencies.iter().enumerate() {
        ui.horizontal(|ui| {
            // A dependency whose target no longer exists still shows up
            // here so the user can prune it; the chart just skips it.
            let dep_name = all_tasks
                .iter()
                .find(|t| t.id == *dep_id)
                .map(|t| t.name.as_str())
                .unwrap_or("(missing)");
            ui.label(
                RichText::new(egui_phosphor::regular::ARROW_RIGHT)
                    .size(10.0)
                    .color(theme::TEXT_DIM),
            );
            ui.label(
                RichText::new(dep_name)
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(
                    egui::Button::new(
                        RichText::new(egui_phosphor::regular::X)
                            .size(9.0)
                            .color(theme::TEXT_DIM),
                    )
                    .frame(false),
                );
                if del.clicked() {
                    remove = Some(i);
                }
            });
        });
    }
    if let Some(i) = remove {
        task.dependencies.remove(i);
        action = EditorAction::Changed;
    }

    let addable: Vec<(String, String)> = all_tasks
        .iter()
        .filter(|t| t.id != task.id && !task.dependencies.contains(&t.id))
        .map(|t| (t.id.clone(), t.name.clone()))
        .collect();
    if !addable.is_empty() {
        egui::ComboBox::from_id_salt(("add_dep", task.id.as_str()))
            .selected_text(
                RichText::new(format!(
                    "{}  Add dependency",
                    egui_phosphor::regular::PLUS
                ))
                .size(11.0),
            )
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for (cid, cname) in &addable {
                    if ui.selectable_label(false, cname.as_str()).clicked() {
                        task.dependencies.push(cid.clone());
                        action = EditorAction::Changed;
                    }
                }
            });
    }

    action
}
