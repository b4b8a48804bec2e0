use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Fixed task categories, each carrying its display metadata so an unhandled
/// variant is a compile error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    General,
    Work,
    Personal,
    Exercise,
    Meal,
    Meeting,
    Learning,
    Creative,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Exercise => "exercise",
            Self::Meal => "meal",
            Self::Meeting => "meeting",
            Self::Learning => "learning",
            Self::Creative => "creative",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "exercise" => Some(Self::Exercise),
            "meal" => Some(Self::Meal),
            "meeting" => Some(Self::Meeting),
            "learning" => Some(Self::Learning),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Exercise => "Exercise",
            Self::Meal => "Meal",
            Self::Meeting => "Meeting",
            Self::Learning => "Learning",
            Self::Creative => "Creative",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::General => "view-list-symbolic",
            Self::Work => "applications-office-symbolic",
            Self::Personal => "user-home-symbolic",
            Self::Exercise => "applications-games-symbolic",
            Self::Meal => "applications-other-symbolic",
            Self::Meeting => "system-users-symbolic",
            Self::Learning => "accessories-dictionary-symbolic",
            Self::Creative => "applications-graphics-symbolic",
        }
    }

    /// Accent color used for calendar blocks, as sRGB bytes.
    pub fn accent_rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::General => (0xec, 0x48, 0x99),
            Self::Work => (0x3b, 0x82, 0xf6),
            Self::Personal => (0x10, 0xb9, 0x81),
            Self::Exercise => (0xef, 0x44, 0x44),
            Self::Meal => (0xf5, 0x9e, 0x0b),
            Self::Meeting => (0x8b, 0x5c, 0xf6),
            Self::Learning => (0x63, 0x66, 0xf1),
            Self::Creative => (0xec, 0x48, 0x99),
        }
    }

    pub const ALL: &'static [TaskCategory] = &[
        TaskCategory::General,
        TaskCategory::Work,
        TaskCategory::Personal,
        TaskCategory::Exercise,
        TaskCategory::Meal,
        TaskCategory::Meeting,
        TaskCategory::Learning,
        TaskCategory::Creative,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const ALL: &'static [Priority] = &[Priority::Low, Priority::Medium, Priority::High];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Repeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No repeat",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub const ALL: &'static [Repeat] = &[
        Repeat::None,
        Repeat::Daily,
        Repeat::Weekly,
        Repeat::Biweekly,
        Repeat::Monthly,
    ];
}

/// A backend-owned task record. The id is absent only while a draft has not
/// been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub deadline: Option<NaiveDateTime>,
    pub reminder: Option<NaiveDateTime>,
    pub timer_minutes: Option<u32>,
    pub category: TaskCategory,
    pub priority: Priority,
    pub repeat: Repeat,
    pub completed: bool,
    pub tags: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub all_day: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            date,
            time: None,
            deadline: None,
            reminder: None,
            timer_minutes: None,
            category: TaskCategory::General,
            priority: Priority::Medium,
            repeat: Repeat::None,
            completed: false,
            tags: None,
            location: None,
            notes: None,
            all_day: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for cat in TaskCategory::ALL {
            assert_eq!(TaskCategory::from_str(cat.as_str()), Some(*cat));
        }
        assert_eq!(TaskCategory::from_str("errand"), None);
    }

    #[test]
    fn repeat_roundtrip() {
        for repeat in Repeat::ALL {
            assert_eq!(Repeat::from_str(repeat.as_str()), Some(*repeat));
        }
    }

    #[test]
    fn wire_names_are_lowercase() {
        let json = serde_json::to_string(&TaskCategory::Work).unwrap();
        assert_eq!(json, "\"work\"");
        let parsed: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, Priority::High);
    }

    #[test]
    fn new_task_defaults() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let task = Task::new("Water the plants", date);
        assert!(task.id.is_none());
        assert_eq!(task.category, TaskCategory::General);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.all_day);
        assert!(task.time.is_none());
    }
}
