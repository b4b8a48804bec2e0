use chrono::NaiveDate;

use super::task::{Task, TaskCategory};

/// Place categories used by both the discovery feed and the user's own
/// curated places. The wire carries plain strings; anything unrecognized
/// lands on `Other` rather than failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Cafe,
    Restaurant,
    Cultural,
    Festival,
    Museum,
    Park,
    Library,
    Event,
    Workspace,
    Community,
    Other,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Cultural => "cultural",
            Self::Festival => "festival",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Library => "library",
            Self::Event => "event",
            Self::Workspace => "workspace",
            Self::Community => "community",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "cafe" => Self::Cafe,
            "restaurant" => Self::Restaurant,
            "cultural" => Self::Cultural,
            "festival" => Self::Festival,
            "museum" => Self::Museum,
            "park" => Self::Park,
            "library" => Self::Library,
            "event" => Self::Event,
            "workspace" => Self::Workspace,
            "community" => Self::Community,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cafe => "Cafe",
            Self::Restaurant => "Restaurant",
            Self::Cultural => "Cultural",
            Self::Festival => "Festival",
            Self::Museum => "Museum",
            Self::Park => "Park",
            Self::Library => "Library",
            Self::Event => "Event",
            Self::Workspace => "Workspace",
            Self::Community => "Community",
            Self::Other => "Other",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe-symbolic",
            Self::Restaurant => "applications-other-symbolic",
            Self::Cultural => "applications-graphics-symbolic",
            Self::Festival => "applications-multimedia-symbolic",
            Self::Museum => "view-paged-symbolic",
            Self::Park => "weather-clear-symbolic",
            Self::Library => "accessories-dictionary-symbolic",
            Self::Event => "x-office-calendar-symbolic",
            Self::Workspace => "applications-office-symbolic",
            Self::Community => "system-users-symbolic",
            Self::Other => "mark-location-symbolic",
        }
    }

    pub const ALL: &'static [PlaceKind] = &[
        PlaceKind::Cafe,
        PlaceKind::Restaurant,
        PlaceKind::Cultural,
        PlaceKind::Festival,
        PlaceKind::Museum,
        PlaceKind::Park,
        PlaceKind::Library,
        PlaceKind::Event,
        PlaceKind::Other,
    ];
}

/// A nearby place suggested by the discovery endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub kind: PlaceKind,
    pub distance: Option<String>,
    pub rating: Option<f64>,
    pub address: Option<String>,
}

/// A calendar-relevant date from the recommendations endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
    pub kind: String,
}

/// A user-curated point of interest (the `/api/events` resource), distinct
/// from tasks. Default entries are seeded by the backend and read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPlace {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub kind: PlaceKind,
    pub location: String,
    pub city: String,
    pub date: Option<String>,
    pub rating: Option<f64>,
    pub is_default: bool,
}

/// Static stand-ins shown when no location is configured or the discovery
/// call fails; an empty explore view helps nobody.
pub fn fallback_places() -> Vec<Place> {
    vec![
        Place {
            name: "Local Coffee House".to_string(),
            kind: PlaceKind::Cafe,
            distance: Some("0.3 km".to_string()),
            rating: Some(4.5),
            address: Some("123 Main St".to_string()),
        },
        Place {
            name: "Co-working Space".to_string(),
            kind: PlaceKind::Workspace,
            distance: Some("0.5 km".to_string()),
            rating: Some(4.2),
            address: Some("456 Business Ave".to_string()),
        },
        Place {
            name: "Art Gallery Opening".to_string(),
            kind: PlaceKind::Event,
            distance: Some("0.8 km".to_string()),
            rating: Some(4.7),
            address: Some("789 Culture St".to_string()),
        },
    ]
}

/// Synthesize the minimal all-day task for a "plan a visit" shortcut.
pub fn visit_task(place: &Place, date: NaiveDate) -> Task {
    let mut task = Task::new(format!("Visit {}", place.name), date);
    task.description = Some(format!("Check out this {}", place.kind.label().to_lowercase()));
    task.category = TaskCategory::Personal;
    task.location = place.address.clone();
    task.all_day = true;
    task
}

/// Synthesize the all-day task for adding a holiday to the calendar.
pub fn holiday_task(holiday: &Holiday) -> Task {
    let mut task = Task::new(holiday.name.clone(), holiday.date);
    task.description = Some(holiday.kind.clone());
    task.all_day = true;
    task
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_kind_falls_back_to_other() {
        assert_eq!(PlaceKind::from_str("tourist_attraction"), PlaceKind::Other);
        assert_eq!(PlaceKind::from_str("cafe"), PlaceKind::Cafe);
    }

    #[test]
    fn visit_task_is_all_day_personal() {
        let place = &fallback_places()[0];
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let task = visit_task(place, date);
        assert_eq!(task.title, "Visit Local Coffee House");
        assert_eq!(task.category, TaskCategory::Personal);
        assert!(task.all_day);
        assert!(task.time.is_none());
        assert!(task.id.is_none());
    }

    #[test]
    fn holiday_task_keeps_its_date() {
        let holiday = Holiday {
            name: "New Year's Day".to_string(),
            date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            kind: "holiday".to_string(),
        };
        let task = holiday_task(&holiday);
        assert_eq!(task.date, holiday.date);
        assert!(task.all_day);
    }
}
