use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::calendar::is_all_day_span;
use super::task::{Priority, Repeat, Task, TaskCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTab {
    Basic,
    Timing,
    Advanced,
}

impl FormTab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Timing => "Timing",
            Self::Advanced => "Advanced",
        }
    }

    pub const ALL: &'static [FormTab] = &[FormTab::Basic, FormTab::Timing, FormTab::Advanced];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    EmptyTitle,
    BadStart,
    BadDeadline,
    BadReminder,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "A task needs a title"),
            Self::BadStart => write!(f, "Start must be YYYY-MM-DD and HH:MM"),
            Self::BadDeadline => write!(f, "Deadline must be YYYY-MM-DD HH:MM"),
            Self::BadReminder => write!(f, "Reminder must be YYYY-MM-DD HH:MM"),
        }
    }
}

/// The single mutable draft behind the task editor. Field values are the raw
/// form strings; nothing is parsed or validated until save.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    /// Present when editing an existing task; saving then issues an update
    /// instead of a create.
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub priority: Priority,
    pub location: String,
    pub all_day: bool,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub deadline: String,
    pub reminder: String,
    pub repeat: Repeat,
    pub timer_minutes: String,
    pub tags: String,
    pub notes: String,
}

impl TaskDraft {
    /// Draft for a manual slot selection. A span of at least 24 hours is an
    /// all-day selection.
    pub fn for_slot(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            category: TaskCategory::General,
            priority: Priority::Medium,
            location: String::new(),
            all_day: is_all_day_span(start, end),
            start_date: start.format("%Y-%m-%d").to_string(),
            start_time: start.format("%H:%M").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            end_time: end.format("%H:%M").to_string(),
            deadline: String::new(),
            reminder: String::new(),
            repeat: Repeat::None,
            timer_minutes: String::new(),
            tags: String::new(),
            notes: String::new(),
        }
    }

    /// Draft carrying an existing task, including its identifier.
    pub fn from_task(task: &Task) -> Self {
        let time = task.time.unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            category: task.category,
            priority: task.priority,
            location: task.location.clone().unwrap_or_default(),
            all_day: task.time.is_none(),
            start_date: task.date.format("%Y-%m-%d").to_string(),
            start_time: time.format("%H:%M").to_string(),
            end_date: task.date.format("%Y-%m-%d").to_string(),
            end_time: (time + chrono::Duration::hours(1)).format("%H:%M").to_string(),
            deadline: format_optional(task.deadline),
            reminder: format_optional(task.reminder),
            repeat: task.repeat,
            timer_minutes: task
                .timer_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            tags: task.tags.clone().unwrap_or_default(),
            notes: task.notes.clone().unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Validate the draft and build the task payload. The title check runs
    /// here, before any network call is made.
    pub fn validate(&self) -> Result<Task, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let date = parse_date(&self.start_date).ok_or(DraftError::BadStart)?;
        let time = if self.all_day {
            None
        } else {
            Some(parse_time(&self.start_time).ok_or(DraftError::BadStart)?)
        };

        let deadline = parse_optional(&self.deadline).map_err(|_| DraftError::BadDeadline)?;
        let reminder = parse_optional(&self.reminder).map_err(|_| DraftError::BadReminder)?;

        Ok(Task {
            id: self.id.clone(),
            title: title.to_string(),
            description: non_empty(&self.description),
            date,
            time,
            deadline,
            reminder,
            timer_minutes: self.timer_minutes.trim().parse().ok(),
            category: self.category,
            priority: self.priority,
            repeat: self.repeat,
            completed: false,
            tags: non_empty(&self.tags),
            location: non_empty(&self.location),
            notes: non_empty(&self.notes),
            all_day: self.all_day,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Empty input is fine; a non-empty value must parse as a datetime, with a
/// bare date reading as midnight.
fn parse_optional(s: &str) -> Result<Option<NaiveDateTime>, ()> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Ok(Some(dt));
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date.and_hms_opt(0, 0, 0).unwrap())),
        Err(_) => Err(()),
    }
}

fn format_optional(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn full_day_slot_opens_all_day_draft() {
        let draft = TaskDraft::for_slot(dt(2026, 8, 7, 0, 0), dt(2026, 8, 8, 0, 0));
        assert!(draft.all_day);
        assert!(draft.is_new());
    }

    #[test]
    fn short_slot_opens_timed_draft() {
        let draft = TaskDraft::for_slot(dt(2026, 8, 7, 10, 0), dt(2026, 8, 7, 11, 0));
        assert!(!draft.all_day);
        assert_eq!(draft.start_time, "10:00");
    }

    #[test]
    fn empty_title_is_rejected_locally() {
        let mut draft = TaskDraft::for_slot(dt(2026, 8, 7, 10, 0), dt(2026, 8, 7, 11, 0));
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::EmptyTitle));
    }

    #[test]
    fn all_day_draft_drops_time_of_day() {
        let mut draft = TaskDraft::for_slot(dt(2026, 8, 7, 0, 0), dt(2026, 8, 8, 0, 0));
        draft.title = "Conference".to_string();
        let task = draft.validate().unwrap();
        assert!(task.all_day);
        assert!(task.time.is_none());
        assert!(task.id.is_none());
    }

    #[test]
    fn editing_draft_keeps_identifier() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut task = Task::new("Review PR", date);
        task.id = Some("abc-123".to_string());
        task.time = NaiveTime::from_hms_opt(14, 30, 0);

        let draft = TaskDraft::from_task(&task);
        assert!(!draft.is_new());
        let saved = draft.validate().unwrap();
        assert_eq!(saved.id.as_deref(), Some("abc-123"));
        assert_eq!(saved.time, NaiveTime::from_hms_opt(14, 30, 0));
    }

    #[test]
    fn optional_datetimes_parse_or_reject() {
        let mut draft = TaskDraft::for_slot(dt(2026, 8, 7, 10, 0), dt(2026, 8, 7, 11, 0));
        draft.title = "Essay".to_string();
        draft.deadline = "2026-08-10 18:00".to_string();
        let task = draft.validate().unwrap();
        assert_eq!(task.deadline, Some(dt(2026, 8, 10, 18, 0)));

        draft.deadline = "next tuesday".to_string();
        assert_eq!(draft.validate(), Err(DraftError::BadDeadline));

        draft.deadline = "2026-08-10".to_string();
        let task = draft.validate().unwrap();
        assert_eq!(task.deadline, Some(dt(2026, 8, 10, 0, 0)));
    }

    #[test]
    fn timer_minutes_parse_leniently() {
        let mut draft = TaskDraft::for_slot(dt(2026, 8, 7, 10, 0), dt(2026, 8, 7, 11, 0));
        draft.title = "Focus block".to_string();
        draft.timer_minutes = "25".to_string();
        assert_eq!(draft.validate().unwrap().timer_minutes, Some(25));

        draft.timer_minutes = "a while".to_string();
        assert_eq!(draft.validate().unwrap().timer_minutes, None);
    }
}
