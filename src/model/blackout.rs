use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

use super::{Task, TeamMember, TimelineRange};

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Calendar-wide blackout: weekend or listed holiday, shaded across all
/// rows. One flag per day no matter how many causes apply.
pub fn is_calendar_blackout(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    is_weekend(date) || holidays.contains(&date)
}

/// The assigned member's time-off days inside the visible range, marked on
/// that task's row only. Independent of the calendar-wide overlay; the two
/// compose additively and never affect date math. An unassigned task or a
/// dangling assignee id yields nothing.
pub fn assignee_time_off(
    task: &Task,
    team: &[TeamMember],
    range: &TimelineRange,
) -> Vec<NaiveDate> {
    let member = task
        .assignee_id
        .as_deref()
        .and_then(|id| team.iter().find(|m| m.id == id));
    match member {
        Some(member) => member
            .time_off
            .iter()
            .copied()
            .filter(|d| range.contains(*d))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekends_are_saturday_and_sunday() {
        assert!(is_weekend(d(2024, 1, 6))); // Sat
        assert!(is_weekend(d(2024, 1, 7))); // Sun
        assert!(!is_weekend(d(2024, 1, 8))); // Mon
    }

    #[test]
    fn holiday_on_a_weekday_is_blacked_out() {
        let holidays = BTreeSet::from([d(2024, 1, 10)]);
        assert!(is_calendar_blackout(d(2024, 1, 10), &holidays));
        assert!(!is_calendar_blackout(d(2024, 1, 11), &holidays));
    }

    #[test]
    fn weekend_holiday_overlap_is_a_single_flag() {
        // Saturday that is also a holiday: still just "blacked out".
        let holidays = BTreeSet::from([d(2024, 1, 6)]);
        assert!(is_calendar_blackout(d(2024, 1, 6), &holidays));
    }

    #[test]
    fn time_off_is_filtered_to_the_visible_range() {
        let mut member = TeamMember::new("Charlie Kim", "Backend Dev");
        member.time_off = BTreeSet::from([d(2024, 1, 10), d(2024, 6, 1)]);
        let mut task = Task::new("t", d(2024, 1, 8), d(2024, 1, 12));
        task.assignee_id = Some(member.id.clone());

        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        let days = assignee_time_off(&task, &[member], &range);
        assert_eq!(days, vec![d(2024, 1, 10)]);
    }

    #[test]
    fn dangling_or_missing_assignee_yields_nothing() {
        let range = TimelineRange {
            start: d(2024, 1, 1),
            end: d(2024, 1, 31),
        };
        let unassigned = Task::new("t", d(2024, 1, 8), d(2024, 1, 12));
        assert!(assignee_time_off(&unassigned, &[], &range).is_empty());

        let mut dangling = Task::new("t", d(2024, 1, 8), d(2024, 1, 12));
        dangling.assignee_id = Some("gone".to_string());
        assert!(assignee_time_off(&dangling, &[], &range).is_empty());
    }
}
