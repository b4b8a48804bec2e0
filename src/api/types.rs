//! Wire shapes for the companion backend. The backend is loosely typed:
//! enum fields travel as plain strings, datetimes as ISO strings, even the
//! timer duration is a string. Response structs mirror that and are
//! converted into the core types afterwards.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::explore::{Holiday, Place, PlaceKind, UserPlace};
use crate::core::session::{TrialStatus, UserProfile};
use crate::core::task::{Priority, Repeat, Task, TaskCategory};

/// The backend's `{"detail": "..."}` error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnboardingRequest {
    pub name: String,
    pub timezone: String,
    pub personality_type: String,
    pub selected_persona: String,
}

#[derive(Debug, Deserialize)]
pub struct OnboardResponse {
    pub token: String,
    pub user: UserProfile,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
    pub trial_status: TrialStatus,
}

#[derive(Debug, Deserialize)]
pub struct PersonaUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityUpdate {
    pub city: String,
    pub country: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    pub plan: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<WireTask>,
}

#[derive(Debug, Deserialize)]
pub struct TaskEnvelope {
    pub task: WireTask,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub persona_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTask {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub reminder: Option<String>,
    #[serde(default)]
    pub timer_duration: Option<String>,
    #[serde(default)]
    pub repeat: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
}

impl WireTask {
    /// Convert into the core record. Returns None when the date field is
    /// unreadable; unknown enum strings fall back to their defaults.
    pub fn into_task(self) -> Option<Task> {
        let date = parse_iso_datetime(&self.date)?.date();
        let time = self
            .time
            .as_deref()
            .and_then(|t| chrono::NaiveTime::parse_from_str(t, "%H:%M").ok());
        Some(Task {
            id: self.id,
            title: self.title,
            description: self.description.filter(|s| !s.is_empty()),
            date,
            time,
            deadline: self.deadline.as_deref().and_then(parse_iso_datetime),
            reminder: self.reminder.as_deref().and_then(parse_iso_datetime),
            timer_minutes: self
                .timer_duration
                .as_deref()
                .and_then(|s| s.trim().parse().ok()),
            category: self
                .task_type
                .as_deref()
                .and_then(TaskCategory::from_str)
                .unwrap_or(TaskCategory::General),
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::from_str)
                .unwrap_or(Priority::Medium),
            repeat: self
                .repeat
                .as_deref()
                .and_then(Repeat::from_str)
                .unwrap_or(Repeat::None),
            completed: self.completed.unwrap_or(false),
            tags: self.tags.filter(|s| !s.is_empty()),
            location: self.location.filter(|s| !s.is_empty()),
            notes: self.notes.filter(|s| !s.is_empty()),
            all_day: self.all_day.unwrap_or(time.is_none()),
        })
    }
}

/// Outgoing task body for create and update.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub task_type: &'static str,
    pub priority: &'static str,
    pub deadline: Option<String>,
    pub reminder: Option<String>,
    pub timer_duration: Option<String>,
    pub repeat: &'static str,
    pub tags: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub all_day: bool,
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            date: format!("{}T00:00:00", task.date.format("%Y-%m-%d")),
            time: task.time.map(|t| t.format("%H:%M").to_string()),
            task_type: task.category.as_str(),
            priority: task.priority.as_str(),
            deadline: task.deadline.map(format_iso_datetime),
            reminder: task.reminder.map(format_iso_datetime),
            timer_duration: task.timer_minutes.map(|m| m.to_string()),
            repeat: task.repeat.as_str(),
            tags: task.tags.clone(),
            location: task.location.clone(),
            notes: task.notes.clone(),
            all_day: task.all_day,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanDayRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanDayResponse {
    #[serde(default)]
    pub timeline: Vec<WireTask>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_tasks: u32,
}

#[derive(Debug, Deserialize)]
pub struct NearbyResponse {
    #[serde(default)]
    pub places: Vec<WirePlace>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mock_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePlace {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

impl WirePlace {
    pub fn into_place(self) -> Place {
        Place {
            name: self.name,
            kind: self
                .kind
                .as_deref()
                .map(PlaceKind::from_str)
                .unwrap_or(PlaceKind::Other),
            distance: self.distance,
            rating: self.rating,
            address: self.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HolidaysResponse {
    #[serde(default)]
    pub holidays: Vec<WireHoliday>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireHoliday {
    pub name: String,
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl WireHoliday {
    pub fn into_holiday(self) -> Option<Holiday> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        Some(Holiday {
            name: self.name,
            date,
            kind: self.kind.unwrap_or_else(|| "holiday".to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UserPlacesResponse {
    #[serde(default)]
    pub events: Vec<WireUserPlace>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUserPlace {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

impl WireUserPlace {
    pub fn into_user_place(self) -> UserPlace {
        UserPlace {
            id: self.id,
            title: self.title,
            description: self.description.filter(|s| !s.is_empty()),
            kind: self
                .event_type
                .as_deref()
                .map(PlaceKind::from_str)
                .unwrap_or(PlaceKind::Other),
            location: self.location.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            date: self.date.filter(|s| !s.is_empty()),
            rating: self.rating,
            is_default: self.is_default.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPlacePayload {
    pub title: String,
    pub description: Option<String>,
    pub event_type: &'static str,
    pub location: String,
    pub city: String,
    pub date: Option<String>,
    pub rating: Option<f64>,
}

impl From<&UserPlace> for UserPlacePayload {
    fn from(place: &UserPlace) -> Self {
        Self {
            title: place.title.clone(),
            description: place.description.clone(),
            event_type: place.kind.as_str(),
            location: place.location.clone(),
            city: place.city.clone(),
            date: place.date.clone(),
            rating: place.rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonaMessageResponse {
    pub message: String,
    #[serde(default)]
    pub persona: Option<String>,
}

/// The backend emits bare naive timestamps but tolerates offsets; accept
/// both here.
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

fn format_iso_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn tasks_response_parses_timed_and_all_day() {
        let json = r#"{
            "tasks": [
                {
                    "id": "t-1",
                    "title": "Standup",
                    "date": "2026-08-07T00:00:00",
                    "time": "14:30",
                    "task_type": "meeting",
                    "priority": "high",
                    "completed": false,
                    "repeat": "weekly",
                    "timer_duration": "25"
                },
                {
                    "id": "t-2",
                    "title": "Street festival",
                    "date": "2026-08-09T00:00:00Z",
                    "time": null,
                    "task_type": "cultural-outing",
                    "all_day": true
                }
            ]
        }"#;
        let parsed: TasksResponse = serde_json::from_str(json).unwrap();
        let tasks: Vec<Task> = parsed
            .tasks
            .into_iter()
            .filter_map(WireTask::into_task)
            .collect();
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].time, NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(tasks[0].category, TaskCategory::Meeting);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].repeat, Repeat::Weekly);
        assert_eq!(tasks[0].timer_minutes, Some(25));

        // Unknown category falls back rather than failing the whole load.
        assert_eq!(tasks[1].category, TaskCategory::General);
        assert!(tasks[1].all_day);
        assert_eq!(
            tasks[1].date,
            NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()
        );
    }

    #[test]
    fn unreadable_date_drops_the_record() {
        let wire = WireTask {
            id: Some("t-3".into()),
            title: "Broken".into(),
            description: None,
            date: "someday".into(),
            time: None,
            task_type: None,
            priority: None,
            completed: None,
            deadline: None,
            reminder: None,
            timer_duration: None,
            repeat: None,
            tags: None,
            location: None,
            notes: None,
            all_day: None,
        };
        assert!(wire.into_task().is_none());
    }

    #[test]
    fn payload_omits_time_for_all_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut task = Task::new("Conference", date);
        task.all_day = true;
        let value = serde_json::to_value(TaskPayload::from(&task)).unwrap();
        assert_eq!(value["date"], "2026-08-07T00:00:00");
        assert_eq!(value["time"], serde_json::Value::Null);
        assert_eq!(value["all_day"], true);
        assert_eq!(value["task_type"], "general");
    }

    #[test]
    fn nearby_response_maps_unknown_kind_to_other() {
        let json = r#"{
            "places": [
                {"name": "Old Tower", "type": "tourist_attraction", "rating": 4.7, "address": "1 Hill Rd"},
                {"name": "Local Coffee House", "type": "cafe", "distance": "0.3 km"}
            ],
            "message": "Go see something new!",
            "mock_data": false
        }"#;
        let parsed: NearbyResponse = serde_json::from_str(json).unwrap();
        let places: Vec<Place> = parsed.places.into_iter().map(WirePlace::into_place).collect();
        assert_eq!(places[0].kind, PlaceKind::Other);
        assert_eq!(places[1].kind, PlaceKind::Cafe);
        assert_eq!(parsed.message.as_deref(), Some("Go see something new!"));
    }

    #[test]
    fn holidays_parse_and_skip_bad_dates() {
        let json = r#"{
            "holidays": [
                {"name": "New Year's Day", "date": "2027-01-01", "type": "holiday"},
                {"name": "Mystery", "date": "soon"}
            ]
        }"#;
        let parsed: HolidaysResponse = serde_json::from_str(json).unwrap();
        let holidays: Vec<Holiday> = parsed
            .holidays
            .into_iter()
            .filter_map(WireHoliday::into_holiday)
            .collect();
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].kind, "holiday");
    }

    #[test]
    fn error_body_detail_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Trial expired"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("Trial expired"));
        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.detail.is_none());
    }

    #[test]
    fn iso_datetimes_with_and_without_offset() {
        assert_eq!(
            parse_iso_datetime("2026-08-07T09:30:00"),
            NaiveDate::from_ymd_opt(2026, 8, 7)
                .unwrap()
                .and_hms_opt(9, 30, 0)
        );
        assert!(parse_iso_datetime("2026-08-07T09:30:00Z").is_some());
        assert!(parse_iso_datetime("not a date").is_none());
    }
}
