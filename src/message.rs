use chrono::{NaiveDate, NaiveDateTime};

use cadence::api::ApiError;
use cadence::core::calendar::CalendarView;
use cadence::core::draft::FormTab;
use cadence::core::explore::{Holiday, Place, UserPlace};
use cadence::core::session::{Persona, Session, SubscriptionPlan};
use cadence::core::task::{Priority, Repeat, Task, TaskCategory};

/// Main navigation sections, mirrored in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    Calendar,
    Explore,
    Settings,
}

impl MainTab {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Explore => "Explore",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Calendar => "x-office-calendar-symbolic",
            Self::Explore => "mark-location-symbolic",
            Self::Settings => "emblem-system-symbolic",
        }
    }

    pub const ALL: &'static [MainTab] = &[MainTab::Calendar, MainTab::Explore, MainTab::Settings];
}

#[derive(Debug, Clone)]
pub enum Message {
    // Session bootstrap
    TokenLoaded(Option<String>),
    ProfileLoaded(Result<Session, ApiError>),

    // Onboarding wizard
    OnboardNameInput(String),
    OnboardTimezoneSelected(usize),
    OnboardPersonalitySelected(usize),
    OnboardPersonaSelected(Persona),
    OnboardNext,
    OnboardBack,
    OnboardSubmit,
    OnboardFinished(Result<(String, Session, Option<String>), ApiError>),

    // Paywall
    SelectPlan(SubscriptionPlan),
    Subscribe,
    SubscribeFinished(Result<Option<String>, ApiError>),

    // Session
    Logout,
    PersonaSelected(Persona),
    PersonaUpdated(Persona, Result<Option<String>, ApiError>),
    PersonaMessageFetched(Result<String, ApiError>),

    // Calendar navigation & loading
    SetCalendarView(CalendarView),
    CalendarPrev,
    CalendarNext,
    CalendarToday,
    CalendarSelectDay(NaiveDate),
    ReloadTasks,
    TasksLoaded(u64, Result<Vec<Task>, ApiError>),

    // Drafts
    NewTask,
    NewAllDayTask,
    OpenSlotDraft(NaiveDateTime, NaiveDateTime),
    EditTask(String),

    // Day planning
    PlanDay,
    DayPlanned(Result<(Vec<Task>, Option<String>), ApiError>),

    // Task editor form
    EditorTabSelected(FormTab),
    DraftTitle(String),
    DraftDescription(String),
    DraftCategory(TaskCategory),
    DraftPriority(Priority),
    DraftLocation(String),
    DraftAllDay(bool),
    DraftStartDate(String),
    DraftStartTime(String),
    DraftEndDate(String),
    DraftEndTime(String),
    DraftDeadline(String),
    DraftReminder(String),
    DraftRepeat(Repeat),
    DraftTimerMinutes(String),
    DraftTags(String),
    DraftNotes(String),
    DraftSubmit,
    DraftCancel,
    DraftDelete,
    TaskSaved(Result<Option<String>, ApiError>),
    TaskDeleted(Result<(), ApiError>),

    // Focus countdown (local only)
    TimerStart,
    TimerStop,
    TimerTick,

    // Explore
    ExploreLoaded {
        nearby: Result<(Vec<Place>, Option<String>), ApiError>,
        holidays: Result<Vec<Holiday>, ApiError>,
    },
    UserPlacesLoaded(Result<Vec<UserPlace>, ApiError>),
    AddPlaceToCalendar(usize),
    AddHolidayToCalendar(usize),
    RecommendationAdded(Result<(String, Option<String>), ApiError>),

    // User-curated place form
    OpenPlaceForm(Option<usize>),
    PlaceTitle(String),
    PlaceDescription(String),
    PlaceKindSelected(usize),
    PlaceLocation(String),
    PlaceCity(String),
    PlaceDate(String),
    PlaceRating(String),
    PlaceSubmit,
    PlaceCancel,
    PlaceDelete(usize),
    PlaceSaved(Result<(), ApiError>),
    PlaceDeleted(Result<(), ApiError>),

    // Settings
    SetServerUrl(String),
    SetDefaultView(usize),
    SetWeekStart(usize),
    LatitudeInput(String),
    LongitudeInput(String),
    ApplyLocation,
    ToggleDebugLogging,

    // Notices
    DismissNotice,

    // Keyring maintenance finished; nothing to apply.
    TokenCleared,
}
