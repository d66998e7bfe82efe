use chrono::NaiveDate;

use super::Task;

/// Horizontal pixel width of one calendar day.
pub const DAY_WIDTH: f32 = 28.0;

/// Days of slack shown before the earliest task start.
const LEAD_DAYS: i64 = 5;
/// Days of slack shown after the latest task end. Larger than the lead
/// because users scroll forward far more than backward.
const TRAIL_DAYS: i64 = 15;

/// The visible date span of the timeline and its date↔pixel mapping.
///
/// Derived from the task list on every render pass; holds no other state.
/// All conversions are day-granular over `NaiveDate`, so time-of-day and
/// timezone skew cannot introduce off-by-one columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineRange {
    /// First visible day (inclusive).
    pub start: NaiveDate,
    /// Last visible day (inclusive).
    pub end: NaiveDate,
}

impl TimelineRange {
    /// Derive the visible range from all task dates, with lead/trail buffers.
    /// An empty task list yields a degenerate single-day range at `today`.
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let min_start = tasks.iter().map(|t| t.start).min();
        let max_end = tasks.iter().map(|t| t.end).max();
        match (min_start, max_end) {
            (Some(min_start), Some(max_end)) => Self {
                start: min_start - chrono::Duration::days(LEAD_DAYS),
                end: max_end + chrono::Duration::days(TRAIL_DAYS),
            },
            _ => Self {
                start: today,
                end: today,
            },
        }
    }

    /// Number of days in the inclusive range, clamped to at least one so a
    /// pathologically reversed input still lays out.
    pub fn num_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// The ordered sequence of calendar days in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.num_days() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Convert a date to an x-pixel offset from the range start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        (date - self.start).num_days() as f32 * DAY_WIDTH
    }

    /// Convert an x-pixel offset back to a date. Rounds to the nearest day,
    /// so an offset past the half-day threshold snaps to the next column.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let days = (x / DAY_WIDTH).round() as i64;
        self.start + chrono::Duration::days(days)
    }

    /// Total width in pixels of the visible range.
    pub fn total_width(&self) -> f32 {
        self.num_days() as f32 * DAY_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_adds_lead_and_trail_buffers() {
        let tasks = vec![
            Task::new("a", d(2024, 2, 10), d(2024, 2, 20)),
            Task::new("b", d(2024, 2, 5), d(2024, 2, 12)),
        ];
        let range = TimelineRange::from_tasks(&tasks, d(2024, 1, 1));
        assert_eq!(range.start, d(2024, 1, 31)); // 2024-02-05 − 5
        assert_eq!(range.end, d(2024, 3, 6)); // 2024-02-20 + 15
    }

    #[test]
    fn empty_task_list_yields_single_day_at_today() {
        let today = d(2024, 6, 1);
        let range = TimelineRange::from_tasks(&[], today);
        assert_eq!(range.start, today);
        assert_eq!(range.end, today);
        assert_eq!(range.num_days(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), vec![today]);
    }

    #[test]
    fn day_sequence_covers_the_inclusive_span() {
        let tasks = vec![Task::new("a", d(2024, 1, 10), d(2024, 1, 10))];
        let range = TimelineRange::from_tasks(&tasks, d(2024, 1, 1));
        // 5 lead + 1 + 15 trail
        assert_eq!(range.num_days(), 21);
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 21);
        assert_eq!(days[0], range.start);
        assert_eq!(*days.last().unwrap(), range.end);
    }

    #[test]
    fn reversed_task_dates_do_not_break_the_range() {
        let tasks = vec![Task::new("r", d(2024, 1, 12), d(2024, 1, 10))];
        let range = TimelineRange::from_tasks(&tasks, d(2024, 1, 1));
        assert_eq!(range.start, d(2024, 1, 7));
        assert_eq!(range.end, d(2024, 1, 25));

        // Pathological reversal beyond the buffers still lays out: the day
        // sequence clamps to a single column instead of going negative.
        let tasks = vec![Task::new("r", d(2024, 3, 1), d(2024, 1, 1))];
        let range = TimelineRange::from_tasks(&tasks, d(2024, 1, 1));
        assert!(range.start > range.end);
        assert_eq!(range.num_days(), 1);
        assert_eq!(range.days().count(), 1);
        assert_eq!(range.total_width(), DAY_WIDTH);
    }

    #[test]
    fn mapping_is_day_width_per_day() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        assert_eq!(range.date_to_x(d(2024, 1, 1)), 0.0);
        assert_eq!(range.date_to_x(d(2024, 1, 4)), 3.0 * DAY_WIDTH);
        // Dates before the range map to negative offsets rather than clamping.
        assert_eq!(range.date_to_x(d(2023, 12, 31)), -DAY_WIDTH);
    }

    #[test]
    fn inverse_mapping_rounds_at_the_half_day() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        assert_eq!(range.x_to_date(0.49 * DAY_WIDTH), d(2024, 1, 1));
        assert_eq!(range.x_to_date(0.51 * DAY_WIDTH), d(2024, 1, 2));
        assert_eq!(range.x_to_date(-0.51 * DAY_WIDTH), d(2023, 12, 31));
    }

    proptest! {
        #[test]
        fn x_for_date_for_x_round_trips_on_day_multiples(day_offset in 0i64..3650) {
            let range = TimelineRange { start: d(2020, 1, 1), end: d(2030, 1, 1) };
            let x = day_offset as f32 * DAY_WIDTH;
            prop_assert_eq!(range.date_to_x(range.x_to_date(x)), x);
        }

        #[test]
        fn date_round_trips_through_pixels(day_offset in 0i64..3650) {
            let range = TimelineRange { start: d(2020, 1, 1), end: d(2030, 1, 1) };
            let date = range.start + chrono::Duration::days(day_offset);
            prop_assert_eq!(range.x_to_date(range.date_to_x(date)), date);
        }
    }
}
