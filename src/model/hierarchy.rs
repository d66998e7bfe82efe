use egui::Color32;

use super::Task;

/// One rendered row of the timeline, in final top-to-bottom order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Index into the task slice the rows were resolved from.
    pub index: usize,
    /// Group color: the root's palette color, inherited by its children.
    pub color: Color32,
    /// True when other tasks name this one as parent. A header keeps its row
    /// and label but draws no bar.
    pub header: bool,
}

/// Resolve the rendering order and group colors for a task list.
///
/// Roots (no parent) appear in list order, each followed immediately by its
/// direct children in list order; every root takes the next palette color
/// (cycling) and children inherit it. Tasks whose parent is not a root —
/// dangling references and deeper chains alike — flatten to a tail in list
/// order with the neutral fallback color. The hierarchy is exactly two
/// tiers, so no cycle handling is needed. Output is stable for a given
/// input list; nothing is re-sorted by date or name.
pub fn resolve_rows(tasks: &[Task], palette: &[Color32], fallback: Color32) -> Vec<Row> {
    let mut rows = Vec::with_capacity(tasks.len());
    let mut placed = vec![false; tasks.len()];

    let is_header =
        |id: &str| tasks.iter().any(|t| t.parent_id.as_deref() == Some(id));

    let mut root_count = 0usize;
    for (i, task) in tasks.iter().enumerate() {
        if task.parent_id.is_some() {
            continue;
        }
        let color = if palette.is_empty() {
            fallback
        } else {
            palette[root_count % palette.len()]
        };
        root_count += 1;
        placed[i] = true;
        rows.push(Row {
            index: i,
            color,
            header: is_header(&task.id),
        });
        for (j, child) in tasks.iter().enumerate() {
            if placed[j] || child.parent_id.as_deref() != Some(task.id.as_str()) {
                continue;
            }
            placed[j] = true;
            rows.push(Row {
                index: j,
                color,
                header: is_header(&child.id),
            });
        }
    }

    for (i, task) in tasks.iter().enumerate() {
        if !placed[i] {
            rows.push(Row {
                index: i,
                color: fallback,
                header: is_header(&task.id),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PALETTE: [Color32; 2] = [
        Color32::from_rgb(66, 133, 244),
        Color32::from_rgb(52, 168, 83),
    ];
    const FALLBACK: Color32 = Color32::from_rgb(120, 124, 136);

    fn task(id: &str, parent: Option<&str>) -> Task {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut t = Task::new(id, d, d);
        t.id = id.to_string();
        t.parent_id = parent.map(str::to_string);
        t
    }

    fn order(rows: &[Row], tasks: &[Task]) -> Vec<String> {
        rows.iter().map(|r| tasks[r.index].id.clone()).collect()
    }

    #[test]
    fn roots_interleave_with_their_children() {
        let tasks = vec![
            task("a", None),
            task("b", None),
            task("a1", Some("a")),
            task("b1", Some("b")),
        ];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert_eq!(order(&rows, &tasks), ["a", "a1", "b", "b1"]);
        assert_eq!(rows[0].color, rows[1].color); // a1 inherits a
        assert_eq!(rows[2].color, rows[3].color); // b1 inherits b
        assert_ne!(rows[0].color, rows[2].color);
    }

    #[test]
    fn palette_cycles_over_roots() {
        let tasks = vec![task("a", None), task("b", None), task("c", None)];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert_eq!(rows[0].color, PALETTE[0]);
        assert_eq!(rows[1].color, PALETTE[1]);
        assert_eq!(rows[2].color, PALETTE[0]);
    }

    #[test]
    fn orphans_trail_in_list_order_with_fallback_color() {
        let tasks = vec![
            task("z", Some("missing")),
            task("a", None),
            task("a1", Some("a")),
            task("y", Some("a1")), // parent is a child, not a root
        ];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert_eq!(order(&rows, &tasks), ["a", "a1", "z", "y"]);
        assert_eq!(rows[2].color, FALLBACK);
        assert_eq!(rows[3].color, FALLBACK);
    }

    #[test]
    fn header_flag_marks_tasks_with_children() {
        let tasks = vec![task("a", None), task("a1", Some("a")), task("b", None)];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert!(rows[0].header); // a has a1
        assert!(!rows[1].header);
        assert!(!rows[2].header); // childless root is a plain bar
    }

    #[test]
    fn a_child_with_children_is_still_flagged_as_header() {
        // Two-tier flattening sends the grandchild to the orphan tail, but
        // the mid-level task is still "named as parent" and draws no bar.
        let tasks = vec![
            task("a", None),
            task("a1", Some("a")),
            task("a1x", Some("a1")),
        ];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert_eq!(order(&rows, &tasks), ["a", "a1", "a1x"]);
        assert!(rows[1].header);
        assert_eq!(rows[2].color, FALLBACK);
    }

    #[test]
    fn order_is_stable_and_never_date_sorted() {
        let d1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut late = task("late", None);
        late.start = d1;
        late.end = d1;
        let mut early = task("early", None);
        early.start = d0;
        early.end = d0;
        let tasks = vec![late, early];
        let rows = resolve_rows(&tasks, &PALETTE, FALLBACK);
        assert_eq!(order(&rows, &tasks), ["late", "early"]);
    }

    #[test]
    fn empty_palette_falls_back_for_everything() {
        let tasks = vec![task("a", None)];
        let rows = resolve_rows(&tasks, &[], FALLBACK);
        assert_eq!(rows[0].color, FALLBACK);
    }
}
