use chrono::NaiveDate;
use std::sync::Arc;

use crate::model::{Board, DragController, Task, TaskStatus, TaskType, TeamMember};
use crate::ui;

/// Main application state: the board records plus transient UI state.
///
/// The board is the single owner of tasks, team and holidays. The chart
/// derives its projections from it every frame and proposes date changes
/// back through [`Board::apply_date_change`]; all other mutations go through
/// the CRUD paths below.
pub struct PlanboardApp {
    pub board: Board,
    pub selected_task: Option<String>,
    pub drag: DragController,
    pub read_only: bool,

    // Dialog state
    pub show_add_task: bool,
    pub show_team: bool,
    pub show_about: bool,
    pub new_task_name: String,
    pub new_task_kind: TaskType,
    pub new_task_parent: Option<String>,
    pub new_task_assignee: Option<String>,
    pub new_task_start_date: NaiveDate,
    pub new_task_end_date: NaiveDate,
    pub new_member_name: String,
    pub new_member_role: String,
    pub time_off_pick: NaiveDate,
    pub holiday_pick: NaiveDate,

    // Status message
    pub status_message: String,

    /// Most recent capture of the rendered surface, kept for the host to
    /// consume. No format promise beyond "the current visual state".
    pub last_capture: Option<Arc<egui::ColorImage>>,
}

impl PlanboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();

        Self {
            board: Self::sample_board(),
            selected_task: None,
            drag: DragController::default(),
            read_only: false,
            show_add_task: false,
            show_team: false,
            show_about: false,
            new_task_name: String::new(),
            new_task_kind: TaskType::Task,
            new_task_parent: None,
            new_task_assignee: None,
            new_task_start_date: today,
            new_task_end_date: today + chrono::Duration::days(7),
            new_member_name: String::new(),
            new_member_role: String::new(),
            time_off_pick: today,
            holiday_pick: today,
            status_message: "Ready".to_string(),
            last_capture: None,
        }
    }

    /// Generate a sample board for demonstration.
    fn sample_board() -> Board {
        let today = chrono::Local::now().date_naive();
        let day = |n: i64| today + chrono::Duration::days(n);

        let mut board = Board::new("Website Relaunch");

        let mut alice = TeamMember::new("Alice Chen", "Project Manager");
        alice.time_off.insert(day(5));
        let bob = TeamMember::new("Bob Smith", "Frontend Dev");
        let mut charlie = TeamMember::new("Charlie Kim", "Backend Dev");
        charlie.time_off.insert(day(10));
        charlie.time_off.insert(day(11));
        let diana = TeamMember::new("Diana Prince", "Designer");

        board.holidays.insert(day(14));

        // ── Phase 1: Planning ───────────────────────────────────────
        let mut planning = Task::new("Phase 1: Planning", today, day(3));
        planning.status = TaskStatus::Completed;
        planning.progress = 100;
        planning.assignee_id = Some(alice.id.clone());
        planning.projected_hours = 10;
        planning.actual_hours = 10;

        let mut kickoff = Task::new_milestone("Project Kickoff", today);
        kickoff.parent_id = Some(planning.id.clone());
        kickoff.assignee_id = Some(alice.id.clone());
        kickoff.status = TaskStatus::Completed;
        kickoff.progress = 100;
        kickoff.projected_hours = 2;
        kickoff.actual_hours = 2;

        let mut requirements = Task::new("Requirements Gathering", day(1), day(3));
        requirements.kind = TaskType::Subtask;
        requirements.parent_id = Some(planning.id.clone());
        requirements.assignee_id = Some(alice.id.clone());
        requirements.dependencies = vec![kickoff.id.clone()];
        requirements.status = TaskStatus::Completed;
        requirements.progress = 100;
        requirements.projected_hours = 20;
        requirements.actual_hours = 24;

        // ── Phase 2: Core Development ───────────────────────────────
        let mut development = Task::new("Phase 2: Core Development", day(4), day(12));
        development.status = TaskStatus::InProgress;
        development.progress = 40;

        let mut mockups = Task::new("Design System Mockups", day(4), day(8));
        mockups.kind = TaskType::Subtask;
        mockups.parent_id = Some(development.id.clone());
        mockups.assignee_id = Some(diana.id.clone());
        mockups.dependencies = vec![requirements.id.clone()];
        mockups.status = TaskStatus::InProgress;
        mockups.progress = 60;
        mockups.projected_hours = 40;
        mockups.actual_hours = 20;

        let mut schema = Task::new("Database Schema", day(4), day(6));
        schema.kind = TaskType::Subtask;
        schema.parent_id = Some(development.id.clone());
        schema.assignee_id = Some(charlie.id.clone());
        schema.dependencies = vec![requirements.id.clone()];
        schema.status = TaskStatus::InProgress;
        schema.progress = 80;
        schema.projected_hours = 16;
        schema.actual_hours = 12;

        let mut api = Task::new("API Development", day(7), day(12));
        api.kind = TaskType::Subtask;
        api.parent_id = Some(development.id.clone());
        api.assignee_id = Some(charlie.id.clone());
        api.dependencies = vec![schema.id.clone()];
        api.projected_hours = 48;

        // ── Phase 3: Frontend & Launch ──────────────────────────────
        let launch_phase = Task::new("Phase 3: Frontend & Launch", day(9), day(16));

        let mut frontend = Task::new("Frontend Implementation", day(9), day(15));
        frontend.kind = TaskType::Subtask;
        frontend.parent_id = Some(launch_phase.id.clone());
        frontend.assignee_id = Some(bob.id.clone());
        frontend.dependencies = vec![mockups.id.clone(), api.id.clone()];
        frontend.projected_hours = 56;

        let mut beta = Task::new_milestone("Beta Launch", day(16));
        beta.parent_id = Some(launch_phase.id.clone());
        beta.assignee_id = Some(alice.id.clone());
        beta.dependencies = vec![frontend.id.clone()];

        board.team = vec![alice, bob, charlie, diana];
        board.tasks = vec![
            planning,
            kickoff,
            requirements,
            development,
            mockups,
            schema,
            api,
            launch_phase,
            frontend,
            beta,
        ];
        board
    }

    // --- Task operations ---

    pub fn create_task_from_dialog(&mut self) {
        let name = if self.new_task_name.is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_name.clone()
        };

        let start = self.new_task_start_date;
        let end = if self.new_task_end_date >= start {
            self.new_task_end_date
        } else {
            start
        };

        let mut task = if self.new_task_kind == TaskType::Milestone {
            Task::new_milestone(name, start)
        } else {
            let mut t = Task::new(name, start, end);
            t.kind = self.new_task_kind;
            t
        };
        task.parent_id = self.new_task_parent.clone();
        task.assignee_id = self.new_task_assignee.clone();

        self.selected_task = Some(task.id.clone());
        self.board.add_task(task);
        self.reset_dialog_fields();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: &str) {
        self.board.remove_task(id);
        if self
            .selected_task
            .as_deref()
            .is_some_and(|sel| self.board.task(sel).is_none())
        {
            self.selected_task = None;
        }
        self.status_message = "Task deleted".to_string();
    }

    // --- Mode / export ---

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        // Tear down any in-flight gesture so it cannot commit later.
        self.drag.set_read_only(read_only);
        self.status_message = if read_only {
            "Read-only mode on".to_string()
        } else {
            "Read-only mode off".to_string()
        };
    }

    /// Serialize the board to the clipboard for sharing.
    pub fn copy_snapshot(&mut self, ctx: &egui::Context) {
        match serde_json::to_string_pretty(&self.board) {
            Ok(json) => {
                ctx.copy_text(json);
                self.status_message = "Snapshot copied to clipboard".to_string();
            }
            Err(e) => {
                self.status_message = format!("Snapshot failed: {}", e);
            }
        }
    }

    /// Ask the viewport for a screenshot of the current visual state. The
    /// result arrives as an input event on a later frame.
    pub fn request_capture(&mut self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
        self.status_message = "Capturing...".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_task_name = String::new();
        self.new_task_kind = TaskType::Task;
        self.new_task_parent = None;
        self.new_task_assignee = None;
        self.new_task_start_date = today;
        self.new_task_end_date = today + chrono::Duration::days(7);
    }
}

impl eframe::App for PlanboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // A requested capture comes back as an input event.
        let screenshot = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = screenshot {
            self.status_message =
                format!("Captured {}×{} px", image.size[0], image.size[1]);
            self.last_capture = Some(image);
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Team: {}",
                                self.board.tasks.len(),
                                self.board.team.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: editor for the selected task (when editable) + table
        let mut task_action = ui::task_table::TaskTableAction::None;
        let mut editor_changed = false;
        egui::SidePanel::left("task_panel")
            .default_width(300.0)
            .min_width(240.0)
            .max_width(460.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if !self.read_only {
                    if let Some(sel_id) = self.selected_task.clone() {
                        let tasks_snapshot = self.board.tasks.clone();
                        let team_snapshot = self.board.team.clone();
                        if let Some(task) = self.board.task_mut(&sel_id) {
                            let result = ui::task_editor::show_task_editor(
                                task,
                                &tasks_snapshot,
                                &team_snapshot,
                                ui,
                            );
                            if result == ui::task_editor::EditorAction::Changed {
                                editor_changed = true;
                            }
                            ui.add_space(4.0);
                            ui.separator();
                            ui.add_space(2.0);
                        }
                    }
                }

                task_action = ui::task_table::show_task_table(
                    &self.board,
                    self.selected_task.as_deref(),
                    self.read_only,
                    ui,
                );
            });

        match task_action {
            ui::task_table::TaskTableAction::Select(id) => {
                self.selected_task = Some(id);
            }
            ui::task_table::TaskTableAction::Delete(id) => {
                self.delete_task(&id);
            }
            ui::task_table::TaskTableAction::Add => {
                self.show_add_task = true;
            }
            ui::task_table::TaskTableAction::None => {}
        }

        if editor_changed {
            self.status_message = "Task updated".to_string();
        }

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::gantt_chart::show_gantt_chart(
                &self.board,
                &mut self.drag,
                &mut self.selected_task,
                self.read_only,
                ui,
            );
            if let Some(change) = interaction.committed {
                if self.board.apply_date_change(&change) {
                    if let Some(task) = self.board.task(&change.task_id) {
                        self.status_message = format!(
                            "Updated '{}' ({} → {})",
                            task.name,
                            task.start.format("%Y-%m-%d"),
                            task.end.format("%Y-%m-%d")
                        );
                    }
                }
            }
        });

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_team {
            ui::dialogs::show_team_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
