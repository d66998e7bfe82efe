use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::drag::DateChange;
use super::task::Task;
use super::team::TeamMember;

/// The project state container: tasks, team and holidays.
///
/// Owns the records the timeline projects from. The engine itself never
/// mutates these; it derives read-only projections each render pass and
/// proposes date changes that arrive back through [`Board::apply_date_change`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub tasks: Vec<Task>,
    pub team: Vec<TeamMember>,
    /// Company-wide non-working days, shaded across all rows.
    pub holidays: BTreeSet<NaiveDate>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: Vec::new(),
            team: Vec::new(),
            holidays: BTreeSet::new(),
        }
    }
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // --- Task accessors ---

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Add a task. A task with a resolvable parent is inserted right after
    /// the last entry of that parent's block so sibling order survives;
    /// everything else is appended.
    pub fn add_task(&mut self, task: Task) {
        let insert_pos = task.parent_id.as_deref().and_then(|parent_id| {
            self.tasks
                .iter()
                .rposition(|t| t.id == parent_id || t.parent_id.as_deref() == Some(parent_id))
                .map(|p| p + 1)
        });
        match insert_pos {
            Some(pos) => self.tasks.insert(pos, task),
            None => self.tasks.push(task),
        }
    }

    /// Remove a task and its direct children. Dependency and assignee ids
    /// pointing at the removed tasks are left in place; every consumer
    /// treats unresolved ids as "skip".
    pub fn remove_task(&mut self, id: &str) {
        self.tasks
            .retain(|t| t.id != id && t.parent_id.as_deref() != Some(id));
    }

    /// The commit target for completed drag gestures. Returns whether a
    /// task accepted the change; a change for an unknown id is discarded.
    pub fn apply_date_change(&mut self, change: &DateChange) -> bool {
        match self.task_mut(&change.task_id) {
            Some(task) => {
                task.start = change.start;
                task.end = change.end;
                true
            }
            None => false,
        }
    }

    // --- Team accessors ---

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }

    pub fn member_mut(&mut self, id: &str) -> Option<&mut TeamMember> {
        self.team.iter_mut().find(|m| m.id == id)
    }

    pub fn add_member(&mut self, member: TeamMember) {
        self.team.push(member);
    }

    /// Remove a member. Task assignments keep the id; the row overlays and
    /// the table simply stop resolving it.
    pub fn remove_member(&mut self, id: &str) {
        self.team.retain(|m| m.id != id);
    }

    // --- Holidays ---

    pub fn toggle_holiday(&mut self, date: NaiveDate) {
        if !self.holidays.insert(date) {
            self.holidays.remove(&date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DragMode;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn named(id: &str, parent: Option<&str>) -> Task {
        let mut t = Task::new(id, d(2024, 1, 1), d(2024, 1, 5));
        t.id = id.to_string();
        t.parent_id = parent.map(str::to_string);
        t
    }

    fn ids(board: &Board) -> Vec<&str> {
        board.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn subtasks_insert_after_their_siblings() {
        let mut board = Board::new("p");
        board.add_task(named("a", None));
        board.add_task(named("b", None));
        board.add_task(named("a1", Some("a")));
        board.add_task(named("a2", Some("a")));
        assert_eq!(ids(&board), ["a", "a1", "a2", "b"]);
    }

    #[test]
    fn unresolvable_parent_appends_at_the_end() {
        let mut board = Board::new("p");
        board.add_task(named("a", None));
        board.add_task(named("x", Some("missing")));
        assert_eq!(ids(&board), ["a", "x"]);
    }

    #[test]
    fn removing_a_parent_takes_its_children() {
        let mut board = Board::new("p");
        board.add_task(named("a", None));
        board.add_task(named("a1", Some("a")));
        board.add_task(named("b", None));
        board.remove_task("a");
        assert_eq!(ids(&board), ["b"]);
    }

    #[test]
    fn removing_a_dependency_target_leaves_the_reference_dangling() {
        let mut board = Board::new("p");
        board.add_task(named("a", None));
        let mut b = named("b", None);
        b.dependencies = vec!["a".to_string()];
        board.add_task(b);
        board.remove_task("a");
        assert_eq!(board.task("b").unwrap().dependencies, ["a"]);
    }

    #[test]
    fn date_change_applies_by_id_and_discards_unknown() {
        let mut board = Board::new("p");
        board.add_task(named("a", None));

        let mut ctl = crate::model::DragController::default();
        ctl.begin("a", DragMode::Move, 0.0, d(2024, 1, 1), d(2024, 1, 5));
        ctl.update(2.0 * crate::model::DAY_WIDTH);
        let change = ctl.finish().unwrap();
        assert!(board.apply_date_change(&change));
        assert_eq!(board.task("a").unwrap().start, d(2024, 1, 3));
        assert_eq!(board.task("a").unwrap().end, d(2024, 1, 7));

        let gone = DateChange {
            task_id: "gone".to_string(),
            start: d(2024, 1, 1),
            end: d(2024, 1, 2),
        };
        assert!(!board.apply_date_change(&gone));
    }

    #[test]
    fn removed_member_leaves_assignments_dangling() {
        let mut board = Board::new("p");
        let member = TeamMember::new("Bob Smith", "Frontend Dev");
        let member_id = member.id.clone();
        board.add_member(member);
        let mut t = named("a", None);
        t.assignee_id = Some(member_id.clone());
        board.add_task(t);

        board.remove_member(&member_id);
        assert!(board.member(&member_id).is_none());
        assert_eq!(
            board.task("a").unwrap().assignee_id.as_deref(),
            Some(member_id.as_str())
        );
    }
}
