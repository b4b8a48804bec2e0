use chrono::{Duration, NaiveDateTime, NaiveTime};

use super::task::{Task, TaskCategory};

/// Render-only facts about the source task, carried alongside the computed
/// display window. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResource {
    pub category: TaskCategory,
    pub completed: bool,
    pub has_deadline: bool,
    pub has_reminder: bool,
    pub has_timer: bool,
}

/// A calendar-displayable event derived from a task record.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEvent {
    /// Mirrors the source task id; absent for a not-yet-saved draft.
    pub id: Option<String>,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub resource: EventResource,
}

impl DisplayEvent {
    /// Derive the display window from a task.
    ///
    /// Start is the task date at its time-of-day, or local midnight when no
    /// time is set. Without an explicit end from the backend the block is a
    /// single hour. An all-day task keeps its all-day semantics and only gets
    /// a synthetic one-hour window for grid placement.
    pub fn from_task(task: &Task) -> Self {
        let time = task.time.unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        let start = task.date.and_time(time);
        let end = start + Duration::hours(1);
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            start,
            end,
            all_day: task.time.is_none(),
            resource: EventResource {
                category: task.category,
                completed: task.completed,
                has_deadline: task.deadline.is_some(),
                has_reminder: task.reminder.is_some(),
                has_timer: task.timer_minutes.is_some(),
            },
        }
    }

    pub fn time_label(&self) -> String {
        if self.all_day {
            "All day".to_string()
        } else {
            format!(
                "{} – {}",
                self.start.format("%H:%M"),
                self.end.format("%H:%M")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timed_task_gets_one_hour_block() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut task = Task::new("Standup", date);
        task.time = NaiveTime::from_hms_opt(14, 30, 0);
        let event = DisplayEvent::from_task(&task);
        assert_eq!(event.start, date.and_hms_opt(14, 30, 0).unwrap());
        assert_eq!(event.end, date.and_hms_opt(15, 30, 0).unwrap());
        assert!(!event.all_day);
    }

    #[test]
    fn timeless_task_is_all_day_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let task = Task::new("Laundry", date);
        let event = DisplayEvent::from_task(&task);
        assert!(event.all_day);
        assert_eq!(event.start, date.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(event.end - event.start, Duration::hours(1));
    }

    #[test]
    fn resource_flags_mirror_optionals() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut task = Task::new("Essay", date);
        task.deadline = date.and_hms_opt(18, 0, 0);
        task.timer_minutes = Some(25);
        let event = DisplayEvent::from_task(&task);
        assert!(event.resource.has_deadline);
        assert!(!event.resource.has_reminder);
        assert!(event.resource.has_timer);
    }
}
