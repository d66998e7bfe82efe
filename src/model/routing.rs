use egui::Pos2;

use super::hierarchy::Row;
use super::{Task, TimelineRange, DAY_WIDTH};

/// Horizontal lead-out before the vertical turn, so connectors clear the
/// edge of the prerequisite bar.
pub const CONNECTOR_LEAD: f32 = 10.0;

/// An orthogonal dependency connector in chart-local coordinates (origin at
/// the left edge of the range, top of the first row).
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Prerequisite exit, lead-out corner, bridge corner, dependent entry.
    pub points: [Pos2; 4],
}

/// Route a connector for every dependency of every non-header row that
/// resolves to a rendered task: out of the prerequisite's right edge,
/// a short lead, a vertical bridge between row centers, then into the
/// dependent's start edge. Milestones exit at their point x; bars exit one
/// day-width past their end date (the visual right edge). Dependency ids
/// that resolve to nothing are skipped.
pub fn route_connectors(
    tasks: &[Task],
    rows: &[Row],
    range: &TimelineRange,
    row_pitch: f32,
) -> Vec<Connector> {
    let row_center = |row: usize| row as f32 * row_pitch + row_pitch * 0.5;
    let mut connectors = Vec::new();

    for (to_row, row) in rows.iter().enumerate() {
        if row.header {
            continue;
        }
        let dependent = &tasks[row.index];
        if dependent.dependencies.is_empty() {
            continue;
        }
        let x_in = range.date_to_x(dependent.start);
        let y_in = row_center(to_row);

        for dep_id in &dependent.dependencies {
            let from_row = match rows
                .iter()
                .position(|r| tasks[r.index].id == *dep_id)
            {
                Some(pos) => pos,
                None => continue,
            };
            let prerequisite = &tasks[rows[from_row].index];
            let x_out = if prerequisite.is_milestone() {
                range.date_to_x(prerequisite.start)
            } else {
                range.date_to_x(prerequisite.end) + DAY_WIDTH
            };
            let y_out = row_center(from_row);
            let turn_x = x_out + CONNECTOR_LEAD;
            connectors.push(Connector {
                points: [
                    Pos2::new(x_out, y_out),
                    Pos2::new(turn_x, y_out),
                    Pos2::new(turn_x, y_in),
                    Pos2::new(x_in, y_in),
                ],
            });
        }
    }

    connectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hierarchy::resolve_rows;
    use chrono::NaiveDate;
    use egui::Color32;

    const PITCH: f32 = 32.0;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, start: NaiveDate, end: NaiveDate, deps: &[&str]) -> Task {
        let mut t = Task::new(id, start, end);
        t.id = id.to_string();
        t.dependencies = deps.iter().map(|s| s.to_string()).collect();
        t
    }

    fn rows_for(tasks: &[Task]) -> Vec<Row> {
        resolve_rows(tasks, &[Color32::RED], Color32::GRAY)
    }

    #[test]
    fn connector_runs_edge_to_edge_between_row_centers() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 2, 1),
        };
        let tasks = vec![
            task("a", d(2024, 1, 3), d(2024, 1, 5), &[]),
            task("b", d(2024, 1, 8), d(2024, 1, 10), &["a"]),
        ];
        let rows = rows_for(&tasks);
        let connectors = route_connectors(&tasks, &rows, &range, PITCH);
        assert_eq!(connectors.len(), 1);

        let c = &connectors[0];
        let x_out = range.date_to_x(d(2024, 1, 5)) + DAY_WIDTH;
        let x_in = range.date_to_x(d(2024, 1, 8));
        assert_eq!(c.points[0], Pos2::new(x_out, PITCH * 0.5));
        assert_eq!(c.points[1], Pos2::new(x_out + CONNECTOR_LEAD, PITCH * 0.5));
        assert_eq!(c.points[2], Pos2::new(x_out + CONNECTOR_LEAD, PITCH * 1.5));
        assert_eq!(c.points[3], Pos2::new(x_in, PITCH * 1.5));
    }

    #[test]
    fn dangling_dependency_produces_no_connector() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 2, 1),
        };
        let tasks = vec![task("b", d(2024, 1, 8), d(2024, 1, 10), &["gone"])];
        let rows = rows_for(&tasks);
        assert!(route_connectors(&tasks, &rows, &range, PITCH).is_empty());
    }

    #[test]
    fn milestone_prerequisite_exits_at_its_point() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 2, 1),
        };
        let mut m = Task::new_milestone("m", d(2024, 1, 5));
        m.id = "m".to_string();
        let tasks = vec![m, task("b", d(2024, 1, 8), d(2024, 1, 10), &["m"])];
        let rows = rows_for(&tasks);
        let connectors = route_connectors(&tasks, &rows, &range, PITCH);
        assert_eq!(connectors[0].points[0].x, range.date_to_x(d(2024, 1, 5)));
    }

    #[test]
    fn header_rows_spawn_no_connectors_but_remain_endpoints() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 2, 1),
        };
        // "phase" is a group header with its own dependency (ignored) and is
        // itself the prerequisite of its child (routed).
        let mut phase = task("phase", d(2024, 1, 3), d(2024, 1, 10), &["child"]);
        phase.parent_id = None;
        let mut child = task("child", d(2024, 1, 12), d(2024, 1, 14), &["phase"]);
        child.parent_id = Some("phase".to_string());
        let tasks = vec![phase, child];
        let rows = rows_for(&tasks);
        assert!(rows[0].header);

        let connectors = route_connectors(&tasks, &rows, &range, PITCH);
        assert_eq!(connectors.len(), 1);
        let expected_exit = range.date_to_x(d(2024, 1, 10)) + DAY_WIDTH;
        assert_eq!(connectors[0].points[0].x, expected_exit);
    }
}
