use chrono::NaiveDate;

use super::timeline::DAY_WIDTH;

/// Which part of the bar a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Whole bar: start and end shift together.
    Move,
    /// Trailing edge: only the end shifts.
    Resize,
}

/// The committed outcome of a completed gesture. `NaiveDate` displays as
/// `YYYY-MM-DD`, the calendar-date form the owning store expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChange {
    pub task_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// An in-flight gesture: the dates captured at pointer-down plus the
/// cumulative pointer delta. The captured dates never change while the
/// gesture is live; recomputed dates are derived on demand.
#[derive(Debug, Clone)]
pub struct DragSession {
    task_id: String,
    mode: DragMode,
    origin_x: f32,
    start: NaiveDate,
    end: NaiveDate,
    delta_x: f32,
}

impl DragSession {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Pixel delta snapped to whole days; past the half-day threshold the
    /// delta rounds to the next day.
    pub fn day_delta(&self) -> i64 {
        (self.delta_x / DAY_WIDTH).round() as i64
    }

    /// Captured dates shifted by the current day delta. A resize that would
    /// pull the end before the unchanged start clamps to a zero-length task.
    fn resolved(&self) -> (NaiveDate, NaiveDate) {
        let shift = chrono::Duration::days(self.day_delta());
        match self.mode {
            DragMode::Move => (self.start + shift, self.end + shift),
            DragMode::Resize => (self.start, (self.end + shift).max(self.start)),
        }
    }
}

/// The move/resize gesture state machine.
///
/// Idle (no session) or Dragging (one session). The session is the only
/// acquire/release resource in the engine: acquired by `begin`, released on
/// every exit path (`finish`, `cancel`, read-only flip). At most one session
/// exists; `begin` only arms from Idle.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    read_only: bool,
}

impl DragController {
    /// Toggle read-only mode. Turning it on tears down any live session so
    /// a stale gesture can never commit afterwards.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.session = None;
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self, task_id: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.task_id == task_id)
    }

    /// Pointer-down: arm a session. Refused in read-only mode, and while a
    /// session is already live (duplicate pointer-down is a no-op).
    pub fn begin(
        &mut self,
        task_id: impl Into<String>,
        mode: DragMode,
        pointer_x: f32,
        start: NaiveDate,
        end: NaiveDate,
    ) {
        if self.read_only || self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            task_id: task_id.into(),
            mode,
            origin_x: pointer_x,
            start,
            end,
            delta_x: 0.0,
        });
    }

    /// Pointer-move: update the cumulative delta. Drives the preview only;
    /// nothing is written back until `finish`. Ignored while Idle.
    pub fn update(&mut self, pointer_x: f32) {
        if let Some(session) = self.session.as_mut() {
            session.delta_x = pointer_x - session.origin_x;
        }
    }

    /// Live preview dates for a task, or `None` when it is not the one
    /// being dragged.
    pub fn preview(&self, task_id: &str) -> Option<(NaiveDate, NaiveDate)> {
        self.session
            .as_ref()
            .filter(|s| s.task_id == task_id)
            .map(DragSession::resolved)
    }

    /// Pointer-up: resolve the final dates, release the session, and emit
    /// the commit exactly once. Pointer-up while Idle is a no-op, not an
    /// error; the caller decides what to do with the change (dropping it is
    /// a valid "no callback registered" outcome).
    #[must_use]
    pub fn finish(&mut self) -> Option<DateChange> {
        let session = self.session.take()?;
        let (start, end) = session.resolved();
        Some(DateChange {
            task_id: session.task_id,
            start,
            end,
        })
    }

    /// Release the session without committing. For host teardown paths;
    /// there is no user-facing cancel gesture.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn start_drag(ctl: &mut DragController, mode: DragMode) {
        ctl.begin("t1", mode, 100.0, d(2024, 1, 10), d(2024, 1, 12));
    }

    #[test]
    fn move_gesture_shifts_both_dates() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.update(100.0 + 2.0 * DAY_WIDTH);
        let change = ctl.finish().unwrap();
        assert_eq!(change.task_id, "t1");
        assert_eq!(change.start, d(2024, 1, 12));
        assert_eq!(change.end, d(2024, 1, 14));
        assert_eq!(change.start.to_string(), "2024-01-12");
    }

    #[test]
    fn resize_gesture_shifts_only_the_end() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Resize);
        ctl.update(100.0 + 3.0 * DAY_WIDTH);
        let change = ctl.finish().unwrap();
        assert_eq!(change.start, d(2024, 1, 10));
        assert_eq!(change.end, d(2024, 1, 15));
    }

    #[test]
    fn resize_clamps_at_the_unchanged_start() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Resize);
        ctl.update(100.0 - 5.0 * DAY_WIDTH);
        let change = ctl.finish().unwrap();
        assert_eq!(change.start, d(2024, 1, 10));
        assert_eq!(change.end, d(2024, 1, 10)); // zero-length floor
    }

    #[test]
    fn sub_half_day_drags_snap_to_no_change() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.update(100.0 + 0.4 * DAY_WIDTH);
        let change = ctl.finish().unwrap();
        assert_eq!(change.start, d(2024, 1, 10));
        assert_eq!(change.end, d(2024, 1, 12));
    }

    #[test]
    fn preview_derives_without_committing() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.update(100.0 + DAY_WIDTH);
        assert_eq!(ctl.preview("t1"), Some((d(2024, 1, 11), d(2024, 1, 13))));
        assert_eq!(ctl.preview("t2"), None);
        // Still dragging: preview consumed nothing.
        assert!(ctl.is_dragging("t1"));
    }

    #[test]
    fn pointer_up_while_idle_is_a_noop() {
        let mut ctl = DragController::default();
        assert!(ctl.finish().is_none());
    }

    #[test]
    fn second_pointer_down_is_refused() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.update(100.0 + DAY_WIDTH);
        // A second begin must not reset or replace the live session.
        ctl.begin("t2", DragMode::Move, 500.0, d(2024, 2, 1), d(2024, 2, 2));
        assert!(ctl.is_dragging("t1"));
        assert!(!ctl.is_dragging("t2"));
    }

    #[test]
    fn read_only_never_leaves_idle() {
        let mut ctl = DragController::default();
        ctl.set_read_only(true);
        start_drag(&mut ctl, DragMode::Move);
        ctl.update(100.0 + 4.0 * DAY_WIDTH);
        assert!(ctl.session().is_none());
        assert!(ctl.finish().is_none());
    }

    #[test]
    fn read_only_flip_tears_down_a_live_session() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.set_read_only(true);
        assert!(ctl.finish().is_none());
    }

    #[test]
    fn cancel_discards_the_session() {
        let mut ctl = DragController::default();
        start_drag(&mut ctl, DragMode::Move);
        ctl.cancel();
        assert!(ctl.finish().is_none());
    }

    proptest! {
        #[test]
        fn move_preserves_duration(delta in -2000.0f32..2000.0) {
            let mut ctl = DragController::default();
            start_drag(&mut ctl, DragMode::Move);
            ctl.update(100.0 + delta);
            let change = ctl.finish().unwrap();
            assert_eq!((change.end - change.start).num_days(), 2);
        }

        #[test]
        fn resize_never_ends_before_start(delta in -2000.0f32..2000.0) {
            let mut ctl = DragController::default();
            start_drag(&mut ctl, DragMode::Resize);
            ctl.update(100.0 + delta);
            let change = ctl.finish().unwrap();
            assert!(change.end >= change.start);
        }
    }
}
