use crate::app::PlanboardApp;
use crate::model::{TaskType, TeamMember};
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Task" dialog.
pub fn show_add_task_dialog(app: &mut PlanboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_task_name)
                            .hint_text("Task name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Type").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_kind")
                        .selected_text(app.new_task_kind.label())
                        .show_ui(ui, |ui| {
                            for kind in TaskType::ALL {
                                ui.selectable_value(&mut app.new_task_kind, kind, kind.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Group").color(theme::TEXT_SECONDARY));
                    let parent_label = app
                        .new_task_parent
                        .as_deref()
                        .and_then(|id| app.board.task(id))
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| "— None —".to_string());
                    let roots: Vec<(String, String)> = app
                        .board
                        .tasks
                        .iter()
                        .filter(|t| t.parent_id.is_none())
                        .map(|t| (t.id.clone(), t.name.clone()))
                        .collect();
                    egui::ComboBox::from_id_salt("dlg_parent")
                        .selected_text(parent_label)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.new_task_parent.is_none(), "— None —")
                                .clicked()
                            {
                                app.new_task_parent = None;
                            }
                            for (id, name) in &roots {
                                if ui
                                    .selectable_label(
                                        app.new_task_parent.as_deref() == Some(id),
                                        name.as_str(),
                                    )
                                    .clicked()
                                {
                                    app.new_task_parent = Some(id.clone());
                                }
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Assignee").color(theme::TEXT_SECONDARY));
                    let assignee_label = app
                        .new_task_assignee
                        .as_deref()
                        .and_then(|id| app.board.member(id))
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| "— Unassigned —".to_string());
                    let members: Vec<(String, String)> = app
                        .board
                        .team
                        .iter()
                        .map(|m| (m.id.clone(), m.name.clone()))
                        .collect();
                    egui::ComboBox::from_id_salt("dlg_assignee")
                        .selected_text(assignee_label)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.new_task_assignee.is_none(), "— Unassigned —")
                                .clicked()
                            {
                                app.new_task_assignee = None;
                            }
                            for (id, name) in &members {
                                if ui
                                    .selectable_label(
                                        app.new_task_assignee.as_deref() == Some(id),
                                        name.as_str(),
                                    )
                                    .clicked()
                                {
                                    app.new_task_assignee = Some(id.clone());
                                }
                            }
                        });
                    ui.end_row();

                    if app.new_task_kind == TaskType::Milestone {
                        ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_task_start_date)
                                .id_salt("dlg_dp_date"),
                        );
                        ui.end_row();
                    } else {
                        ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_task_start_date)
                                .id_salt("dlg_dp_start"),
                        );
                        ui.end_row();

                        ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_task_end_date)
                                .id_salt("dlg_dp_end"),
                        );
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_task_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
    }
}

/// Render the "Team & Holidays" dialog: member CRUD, per-member time off,
/// and the shared holiday set.
pub fn show_team_dialog(app: &mut PlanboardApp, ctx: &Context) {
    let mut should_close = false;
    let read_only = app.read_only;

    Window::new(RichText::new("Team & Holidays").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);
            ui.add_space(4.0);

            let mut remove_member: Option<String> = None;
            let mut add_day_off: Option<String> = None;
            let mut remove_day_off: Option<(String, chrono::NaiveDate)> = None;

            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    for member in &app.board.team {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(&member.avatar)
                                    .size(10.0)
                                    .color(theme::TEXT_DIM),
                            );
                            ui.label(
                                RichText::new(&member.name)
                                    .strong()
                                    .size(12.0)
                                    .color(theme::TEXT_PRIMARY),
                            );
                            ui.label(
                                RichText::new(&member.role)
                                    .size(10.5)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            if !read_only {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let del = ui.add(
                                            egui::Button::new(
                                                RichText::new("✕")
                                                    .size(10.0)
                                                    .color(theme::TEXT_DIM),
                                            )
                                            .frame(false),
                                        );
                                        if del.on_hover_text("Remove member").clicked() {
                                            remove_member = Some(member.id.clone());
                                        }
                                        if ui
                                            .add(
                                                egui::Button::new(
                                                    RichText::new("+ day off").size(10.0),
                                                )
                                                .frame(false),
                                            )
                                            .on_hover_text("Mark the picked date as time off")
                                            .clicked()
                                        {
                                            add_day_off = Some(member.id.clone());
                                        }
                                    },
                                );
                            }
                        });
                        if !member.time_off.is_empty() {
                            ui.horizontal_wrapped(|ui| {
                                ui.add_space(18.0);
                                for date in &member.time_off {
                                    let chip = ui.add(
                                        egui::Button::new(
                                            RichText::new(format!(
                                                "{} ✕",
                                                date.format("%m/%d")
                                            ))
                                            .size(9.5)
                                            .color(theme::TEXT_SECONDARY),
                                        )
                                        .small(),
                                    );
                                    if !read_only
                                        && chip.on_hover_text("Remove day off").clicked()
                                    {
                                        remove_day_off = Some((member.id.clone(), *date));
                                    }
                                }
                            });
                        }
                        ui.add_space(4.0);
                    }
                });

            if let Some(id) = remove_member {
                app.board.remove_member(&id);
                app.status_message = "Member removed".to_string();
            }
            if let Some(id) = add_day_off {
                let date = app.time_off_pick;
                if let Some(member) = app.board.member_mut(&id) {
                    member.time_off.insert(date);
                    app.status_message = "Day off added".to_string();
                }
            }
            if let Some((id, date)) = remove_day_off {
                if let Some(member) = app.board.member_mut(&id) {
                    member.time_off.remove(&date);
                }
            }

            if !read_only {
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.time_off_pick)
                            .id_salt("dlg_dp_timeoff"),
                    );
                    ui.label(
                        RichText::new("used by “+ day off”")
                            .size(9.5)
                            .color(theme::TEXT_DIM),
                    );
                });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.add_sized(
                        [120.0, 22.0],
                        egui::TextEdit::singleline(&mut app.new_member_name).hint_text("Name"),
                    );
                    ui.add_sized(
                        [100.0, 22.0],
                        egui::TextEdit::singleline(&mut app.new_member_role).hint_text("Role"),
                    );
                    if ui.button("Add member").clicked() && !app.new_member_name.is_empty() {
                        let member = TeamMember::new(
                            app.new_member_name.clone(),
                            app.new_member_role.clone(),
                        );
                        app.board.add_member(member);
                        app.new_member_name.clear();
                        app.new_member_role.clear();
                        app.status_message = "Member added".to_string();
                    }
                });
            }

            ui.separator();
            ui.label(
                RichText::new("Holidays")
                    .strong()
                    .size(12.0)
                    .color(theme::TEXT_PRIMARY),
            );
            let mut remove_holiday: Option<chrono::NaiveDate> = None;
            ui.horizontal_wrapped(|ui| {
                for date in &app.board.holidays {
                    let chip = ui.add(
                        egui::Button::new(
                            RichText::new(format!("{} ✕", date.format("%Y-%m-%d")))
                                .size(9.5)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .small(),
                    );
                    if !read_only && chip.on_hover_text("Remove holiday").clicked() {
                        remove_holiday = Some(*date);
                    }
                }
            });
            if let Some(date) = remove_holiday {
                app.board.holidays.remove(&date);
            }
            if !read_only {
                ui.horizontal(|ui| {
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.holiday_pick)
                            .id_salt("dlg_dp_holiday"),
                    );
                    if ui.button("Add holiday").clicked() {
                        let date = app.holiday_pick;
                        app.board.toggle_holiday(date);
                        app.status_message = "Holidays updated".to_string();
                    }
                });
            }

            ui.add_space(6.0);
            if ui
                .add_sized([80.0, 26.0], egui::Button::new("Close"))
                .clicked()
            {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_team = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlanboardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([260.0, 150.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Planboard").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A project-tracking dashboard");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new("Close"))
                    .clicked()
                {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
