use crate::model::{
    blackout, resolve_rows, routing, Board, DateChange, DragController, DragMode, Row, Task,
    TimelineRange, DAY_WIDTH,
};
use crate::ui::theme;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A completed gesture's resolved dates, emitted at most once per
    /// gesture. The owner routes this into its state; dropping it discards
    /// the gesture.
    pub committed: Option<DateChange>,
}

/// Render the Gantt chart area (right panel).
///
/// Everything here is recomputed from the board on every pass: visible
/// range, row order, colors, overlays, connector paths. The only carried
/// state is the drag controller's active session.
pub fn show_gantt_chart(
    board: &Board,
    drag: &mut DragController,
    selected_task: &mut Option<String>,
    read_only: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    let today = chrono::Local::now().date_naive();
    let range = TimelineRange::from_tasks(&board.tasks, today);
    let rows = resolve_rows(&board.tasks, theme::GROUP_COLORS, theme::ORPHAN_COLOR);

    let available = ui.available_size();
    let chart_width = range.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + (rows.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let body_height = chart_height.max(available.y);
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Alternating row backgrounds
            for i in 0..rows.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                        Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            // Calendar-wide blackout columns (weekends + holidays), shaded
            // uniformly across all rows.
            for date in range.days() {
                if blackout::is_calendar_blackout(date, &board.holidays) {
                    let x = origin.x + range.date_to_x(date);
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(x, origin.y + HEADER_HEIGHT),
                            Vec2::new(DAY_WIDTH, body_height - HEADER_HEIGHT),
                        ),
                        0.0,
                        theme::BLACKOUT_FILL,
                    );
                }
            }

            draw_timeline_header(&painter, origin, &range, &board.holidays, body_height);
            draw_today_line(&painter, origin, &range, today, body_height);

            // Per-row assignee time off, hatched on top of whatever the
            // calendar overlay already shaded.
            for (i, row) in rows.iter().enumerate() {
                let task = &board.tasks[row.index];
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                for date in blackout::assignee_time_off(task, &board.team, &range) {
                    let x = origin.x + range.date_to_x(date);
                    draw_time_off_hatch(
                        &painter,
                        Rect::from_min_size(
                            Pos2::new(x, y + ROW_PADDING),
                            Vec2::new(DAY_WIDTH, ROW_HEIGHT),
                        ),
                    );
                }
            }

            draw_connectors(&painter, origin, board, &rows, &range);

            // Task bars, milestone diamonds and group-header labels
            for (i, row) in rows.iter().enumerate() {
                let task = &board.tasks[row.index];
                let y =
                    origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                let is_selected = selected_task.as_deref() == Some(task.id.as_str());

                if row.header {
                    draw_group_header(&painter, origin, &range, task, row.color, y);
                    continue;
                }

                // Live preview geometry while this task is being dragged.
                let (start, end) = drag.preview(&task.id).unwrap_or((task.start, task.end));

                if task.is_milestone() {
                    let task_rect =
                        draw_milestone(&painter, origin, &range, task, row.color, start, y, is_selected);
                    let sense = if read_only {
                        Sense::click()
                    } else {
                        Sense::click_and_drag()
                    };
                    let response = ui.interact(
                        task_rect.expand(6.0),
                        ui.make_persistent_id(("milestone", task.id.as_str())),
                        sense,
                    );

                    if response.clicked() {
                        *selected_task = Some(task.id.clone());
                        consumed_click = true;
                    }

                    if response.drag_started() {
                        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        drag.begin(&task.id, DragMode::Move, ptr_x, task.start, task.end);
                        *selected_task = Some(task.id.clone());
                        consumed_click = true;
                    }
                    if response.dragged() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        drag.update(ptr_x);
                    }
                    if response.drag_stopped() {
                        if let Some(change) = drag.finish() {
                            interaction.committed = Some(change);
                        }
                    }

                    if response.hovered() {
                        show_task_tooltip(ui, board, task, start, end);
                    }
                } else {
                    let bar_rect = draw_task_bar(
                        &painter, origin, &range, task, row.color, start, end, y, is_selected,
                    );

                    let bar_sense = if read_only {
                        Sense::click()
                    } else {
                        Sense::click_and_drag()
                    };
                    let bar_response = ui.interact(
                        bar_rect,
                        ui.make_persistent_id(("task-bar", task.id.as_str())),
                        bar_sense,
                    );

                    // Trailing-edge resize handle. Milestones never get one,
                    // and in read-only mode it does not exist at all.
                    let handle_rect = Rect::from_min_max(
                        Pos2::new(bar_rect.right() - theme::HANDLE_WIDTH * 0.5, bar_rect.top()),
                        Pos2::new(bar_rect.right() + theme::HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                    );
                    let handle_response = (!read_only).then(|| {
                        ui.interact(
                            handle_rect.expand(4.0),
                            ui.make_persistent_id(("task-resize", task.id.as_str())),
                            Sense::drag(),
                        )
                    });

                    if bar_response.clicked() {
                        *selected_task = Some(task.id.clone());
                        consumed_click = true;
                    }

                    if let Some(handle) = &handle_response {
                        if handle.drag_started() {
                            let ptr_x =
                                handle.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                            drag.begin(&task.id, DragMode::Resize, ptr_x, task.start, task.end);
                            *selected_task = Some(task.id.clone());
                            consumed_click = true;
                        }
                    }
                    if bar_response.drag_started() {
                        let ptr_x =
                            bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        drag.begin(&task.id, DragMode::Move, ptr_x, task.start, task.end);
                        *selected_task = Some(task.id.clone());
                        consumed_click = true;
                    }

                    if let Some(handle) = &handle_response {
                        if handle.dragged() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                            let ptr_x =
                                handle.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                            drag.update(ptr_x);
                        }
                        if handle.drag_stopped() {
                            if let Some(change) = drag.finish() {
                                interaction.committed = Some(change);
                            }
                        }
                    }
                    if bar_response.dragged() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                        let ptr_x =
                            bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        drag.update(ptr_x);
                    }
                    if bar_response.drag_stopped() {
                        if let Some(change) = drag.finish() {
                            interaction.committed = Some(change);
                        }
                    }

                    // Handle affordance
                    let handle_hovered =
                        handle_response.as_ref().is_some_and(|h| h.hovered());
                    if handle_hovered {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    } else if bar_response.hovered() && !read_only {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if !read_only && (is_selected || handle_hovered) {
                        let handle_h = bar_rect.height() * 0.55;
                        let handle_y = bar_rect.center().y - handle_h / 2.0;
                        let pill = Rect::from_min_size(
                            Pos2::new(bar_rect.right() - 2.5, handle_y),
                            Vec2::new(4.0, handle_h),
                        );
                        painter.rect_filled(pill, Rounding::same(2.0), theme::HANDLE_COLOR);
                    }

                    if bar_response.hovered() || handle_hovered {
                        show_task_tooltip(ui, board, task, start, end);
                    }
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn show_task_tooltip(ui: &Ui, board: &Board, task: &Task, start: NaiveDate, end: NaiveDate) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id.as_str())),
        |ui| {
            ui.strong(&task.name);
            if task.is_milestone() {
                ui.label(start.format("%Y-%m-%d").to_string());
            } else {
                ui.label(format!(
                    "{} → {}",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d"),
                ));
            }
            ui.label(format!(
                "{} · {}%",
                task.status.label(),
                task.progress.min(100)
            ));
            // Dangling assignee ids resolve to the unassigned placeholder.
            let assignee = task
                .assignee_id
                .as_deref()
                .and_then(|id| board.member(id))
                .map(|m| m.name.as_str())
                .unwrap_or("Unassigned");
            ui.label(
                egui::RichText::new(assignee)
                    .size(10.5)
                    .color(theme::TEXT_SECONDARY),
            );
        },
    );
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimelineRange,
    holidays: &std::collections::BTreeSet<NaiveDate>,
    body_height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(range.total_width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + range.total_width(), origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for date in range.days() {
        let x = origin.x + range.date_to_x(date);

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + body_height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let day_color = if blackout::is_calendar_blackout(date, holidays) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + 3.0, origin.y + 28.0),
            egui::Align2::LEFT_CENTER,
            date.format("%d").to_string(),
            theme::font_sub(),
            day_color,
        );

        if date.day() == 1 || date == range.start {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimelineRange,
    today: NaiveDate,
    height: f32,
) {
    if !range.contains(today) {
        return;
    }
    let x = origin.x + range.date_to_x(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Diagonal hatch across one day cell of one row.
fn draw_time_off_hatch(painter: &egui::Painter, cell: Rect) {
    let clipped = painter.with_clip_rect(cell);
    let step = 6.0;
    let mut x = cell.left() - cell.height();
    while x < cell.right() {
        clipped.line_segment(
            [
                Pos2::new(x, cell.bottom()),
                Pos2::new(x + cell.height(), cell.top()),
            ],
            Stroke::new(1.0, theme::TIME_OFF_HATCH),
        );
        x += step;
    }
}

fn draw_connectors(
    painter: &egui::Painter,
    origin: Pos2,
    board: &Board,
    rows: &[Row],
    range: &TimelineRange,
) {
    let offset = Vec2::new(origin.x, origin.y + HEADER_HEIGHT);
    for connector in
        routing::route_connectors(&board.tasks, rows, range, ROW_HEIGHT + ROW_PADDING)
    {
        let pts: Vec<Pos2> = connector.points.iter().map(|p| *p + offset).collect();
        for pair in pts.windows(2) {
            painter.line_segment([pair[0], pair[1]], Stroke::new(1.0, theme::CONNECTOR));
        }
        // Arrowhead at the dependent's entry point.
        let tip = pts[3];
        painter.add(egui::Shape::convex_polygon(
            vec![
                tip,
                Pos2::new(tip.x - 6.0, tip.y - 4.0),
                Pos2::new(tip.x - 6.0, tip.y + 4.0),
            ],
            theme::CONNECTOR,
            Stroke::NONE,
        ));
    }
}

/// A group header occupies its row as a label only; the span is hinted with
/// a thin underline, never a draggable bar.
fn draw_group_header(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimelineRange,
    task: &Task,
    color: Color32,
    y: f32,
) {
    let x_start = origin.x + range.date_to_x(task.start);
    let x_end = origin.x + range.date_to_x(task.end) + DAY_WIDTH;

    painter.text(
        Pos2::new(x_start, y + ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &task.name,
        theme::font_header(),
        color,
    );
    painter.line_segment(
        [
            Pos2::new(x_start, y + ROW_HEIGHT - 4.0),
            Pos2::new(x_end.max(x_start), y + ROW_HEIGHT - 4.0),
        ],
        Stroke::new(2.0, color.gamma_multiply(0.6)),
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimelineRange,
    task: &Task,
    color: Color32,
    start: NaiveDate,
    end: NaiveDate,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x_start = origin.x + range.date_to_x(start);
    let x_end = origin.x + range.date_to_x(end) + DAY_WIDTH;
    let bar_width = (x_end - x_start).max(6.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Progress fill (darkened overlay)
    if task.progress > 0 {
        let fraction = (task.progress.min(100) as f32) / 100.0;
        let progress_width = bar_width * fraction;
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);

        if task.progress < 98 {
            let tick_x = bar_rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    // Blocked tasks get a warning edge regardless of group color.
    if task.status == crate::model::TaskStatus::Blocked {
        painter.rect_stroke(
            bar_rect,
            rounding,
            Stroke::new(1.5, theme::status_color(task.status)),
        );
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Task name on bar (single line, clipped to bar bounds)
    if bar_width > 30.0 {
        let galley =
            painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

#[allow(clippy::too_many_arguments)]
fn draw_milestone(
    painter: &egui::Painter,
    origin: Pos2,
    range: &TimelineRange,
    task: &Task,
    color: Color32,
    date: NaiveDate,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x = origin.x + range.date_to_x(date);
    let center = Pos2::new(x, y + ROW_HEIGHT / 2.0);
    let size = (ROW_HEIGHT / 2.0 - 3.0).max(6.0);

    // Shadow diamond
    let shadow_offset = Vec2::new(1.0, 1.5);
    let shadow_pts = vec![
        center + shadow_offset + Vec2::new(0.0, -size),
        center + shadow_offset + Vec2::new(size, 0.0),
        center + shadow_offset + Vec2::new(0.0, size),
        center + shadow_offset + Vec2::new(-size, 0.0),
    ];
    painter.add(egui::Shape::convex_polygon(
        shadow_pts,
        Color32::from_black_alpha(40),
        Stroke::NONE,
    ));

    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        points.clone(),
        color,
        Stroke::NONE,
    ));

    if is_selected {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        ));
    }

    painter.text(
        Pos2::new(x + size + 6.0, y + ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &task.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    Rect::from_center_size(center, Vec2::splat(size * 2.0 + 2.0))
}
