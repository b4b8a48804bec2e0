use chrono::{Duration, NaiveDate};

use cosmic::app::{context_drawer, Core, Task as CosmicTask};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, nav_bar, row, scrollable, text, text_input};
use cosmic::{executor, Application, Element};

use cadence::api::client::ApiClient;
use cadence::api::types::OnboardingRequest;
use cadence::api::{token, ApiError};
use cadence::config::CadenceConfig;
use cadence::core::calendar::{self, CalendarView, LoadSequence};
use cadence::core::draft::{FormTab, TaskDraft};
use cadence::core::explore::{self, PlaceKind, UserPlace};
use cadence::core::session::{Session, TrialStatus, PERSONALITY_TYPES, TIMEZONES};
use cadence::core::timer::Countdown;

use crate::components::persona_banner::persona_banner;
use crate::components::task_form::task_form;
use crate::fl;
use crate::message::{MainTab, Message};
use crate::pages;
use crate::pages::onboarding::OnboardForm;

/// Which top-level screen renders, gated on session and trial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Onboarding,
    Paywall,
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Draft state of the user-place editor in the context drawer.
pub struct PlaceForm {
    pub editing: Option<String>,
    pub title: String,
    pub description: String,
    pub kind_idx: usize,
    pub location: String,
    pub city: String,
    pub date: String,
    pub rating: String,
}

impl PlaceForm {
    fn blank(city: String) -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            // Cultural, the long-standing default kind for new entries.
            kind_idx: PlaceKind::ALL
                .iter()
                .position(|k| *k == PlaceKind::Cultural)
                .unwrap_or(0),
            location: String::new(),
            city,
            date: String::new(),
            rating: String::new(),
        }
    }

    fn from_place(place: &UserPlace) -> Self {
        Self {
            editing: place.id.clone(),
            title: place.title.clone(),
            description: place.description.clone().unwrap_or_default(),
            kind_idx: PlaceKind::ALL
                .iter()
                .position(|k| *k == place.kind)
                .unwrap_or(PlaceKind::ALL.len() - 1),
            location: place.location.clone(),
            city: place.city.clone(),
            date: place.date.clone().unwrap_or_default(),
            rating: place
                .rating
                .map(|r| r.to_string())
                .unwrap_or_default(),
        }
    }
}

pub struct Cadence {
    core: Core,
    nav_model: nav_bar::Model,
    config: CadenceConfig,
    cosmic_config: cosmic::cosmic_config::Config,

    screen: Screen,
    active_tab: MainTab,
    client: ApiClient,
    token: Option<String>,
    session: Option<Session>,
    notice: Option<Notice>,
    persona_message: Option<String>,

    // Onboarding / paywall
    onboard: OnboardForm,
    selected_plan: cadence::core::session::SubscriptionPlan,
    paying: bool,

    // Calendar
    calendar_view: CalendarView,
    reference_date: NaiveDate,
    selected_day: Option<NaiveDate>,
    tasks: Vec<cadence::core::task::Task>,
    timeline: Vec<cadence::core::task::Task>,
    /// Stale responses are discarded so a late answer can never overwrite
    /// newer state.
    load_seq: LoadSequence,
    loading: bool,

    // Editor
    draft: Option<TaskDraft>,
    form_tab: FormTab,
    countdown: Option<Countdown>,

    // Explore
    places: Vec<cadence::core::explore::Place>,
    places_fallback: bool,
    holidays: Vec<cadence::core::explore::Holiday>,
    user_places: Vec<UserPlace>,
    place_form: Option<PlaceForm>,

    // Settings inputs
    latitude_input: String,
    longitude_input: String,
}

pub struct Flags {
    pub config: CadenceConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

impl Application for Cadence {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.cadence.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let cosmic_config = flags.cosmic_config;

        let mut nav_model = nav_bar::Model::default();
        for tab in MainTab::ALL {
            nav_model
                .insert()
                .text(tab.title())
                .icon(icon::from_name(tab.icon_name()).icon())
                .data(*tab);
        }

        let client = ApiClient::new(&config.server_url);
        let calendar_view = config.default_view;
        let today = chrono::Local::now().date_naive();

        let app = Self {
            core,
            nav_model,
            latitude_input: config
                .latitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            longitude_input: config
                .longitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            config,
            cosmic_config,
            screen: Screen::Loading,
            active_tab: MainTab::Calendar,
            client,
            token: None,
            session: None,
            notice: None,
            persona_message: None,
            onboard: OnboardForm::default(),
            selected_plan: cadence::core::session::SubscriptionPlan::Monthly,
            paying: false,
            calendar_view,
            reference_date: today,
            selected_day: Some(today),
            tasks: Vec::new(),
            timeline: Vec::new(),
            load_seq: LoadSequence::default(),
            loading: false,
            draft: None,
            form_tab: FormTab::Basic,
            countdown: None,
            places: Vec::new(),
            places_fallback: false,
            holidays: Vec::new(),
            user_places: Vec::new(),
            place_form: None,
        };

        let startup = CosmicTask::perform(
            async move {
                match token::load_token().await {
                    Ok(stored) => stored,
                    Err(e) => {
                        log::warn!("Keyring unavailable: {}", e);
                        None
                    }
                }
            },
            |stored| cosmic::Action::App(Message::TokenLoaded(stored)),
        );

        (app, startup)
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        if self.screen == Screen::Main {
            Some(&self.nav_model)
        } else {
            None
        }
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        let Some(tab) = self.nav_model.data::<MainTab>(id).copied() else {
            return CosmicTask::none();
        };
        self.nav_model.activate(id);
        self.active_tab = tab;
        match tab {
            MainTab::Calendar => self.reload_visible(),
            MainTab::Explore => self.load_explore(),
            MainTab::Settings => CosmicTask::none(),
        }
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        if self.screen != Screen::Main {
            return Vec::new();
        }
        vec![row()
            .spacing(4)
            .push(
                button::icon(icon::from_name("view-refresh-symbolic"))
                    .on_press(Message::ReloadTasks),
            )
            .push(
                button::icon(icon::from_name("system-log-out-symbolic"))
                    .on_press(Message::Logout),
            )
            .into()]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        if let Some(ref draft) = self.draft {
            let title = if draft.is_new() {
                fl!("editor-create-title")
            } else {
                fl!("editor-edit-title")
            };
            return Some(
                context_drawer::context_drawer(
                    container(scrollable(
                        task_form(draft, self.form_tab, self.countdown.as_ref()).padding(16),
                    ))
                    .width(Length::Fill),
                    Message::DraftCancel,
                )
                .title(title),
            );
        }

        if self.place_form.is_some() {
            return Some(
                context_drawer::context_drawer(
                    container(scrollable(self.place_form_view().padding(16))).width(Length::Fill),
                    Message::PlaceCancel,
                )
                .title(fl!("place-form-title")),
            );
        }

        None
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.draft.is_some() || self.place_form.is_some() {
            self.close_drawer();
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        let mut subs = vec![cosmic::iced::event::listen_with(|event, _status, _id| {
            match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => Some(Message::NewTask),
                _ => None,
            }
        })];

        if self.countdown.is_some_and(|c| c.is_running()) {
            subs.push(
                cosmic::iced::time::every(std::time::Duration::from_secs(1))
                    .map(|_| Message::TimerTick),
            );
        }

        cosmic::iced::Subscription::batch(subs)
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            // --- Bootstrap ---
            Message::TokenLoaded(None) => {
                self.screen = Screen::Onboarding;
            }

            Message::TokenLoaded(Some(stored)) => {
                self.token = Some(stored.clone());
                self.client.set_token(Some(stored));
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move { client.fetch_profile().await },
                    |result| cosmic::Action::App(Message::ProfileLoaded(result)),
                );
            }

            Message::ProfileLoaded(Ok(session)) => {
                let locked = session.trial.is_locked();
                self.session = Some(session);
                if locked {
                    self.screen = Screen::Paywall;
                } else {
                    self.screen = Screen::Main;
                    return CosmicTask::batch(vec![
                        self.reload_visible(),
                        self.fetch_persona_message("morning_plan"),
                    ]);
                }
            }

            Message::ProfileLoaded(Err(e)) => {
                // A stale or invalid token reads as logged-out.
                log::warn!("Profile fetch failed: {}", e);
                return self.force_logout();
            }

            // --- Onboarding ---
            Message::OnboardNameInput(value) => self.onboard.name = value,
            Message::OnboardTimezoneSelected(idx) => self.onboard.timezone_idx = idx,
            Message::OnboardPersonalitySelected(idx) => self.onboard.personality = Some(idx),
            Message::OnboardPersonaSelected(persona) => self.onboard.persona = Some(persona),

            Message::OnboardNext => {
                if self.onboard.step_valid() && self.onboard.step < 3 {
                    self.onboard.step += 1;
                }
            }

            Message::OnboardBack => {
                if self.onboard.step > 1 {
                    self.onboard.step -= 1;
                }
            }

            Message::OnboardSubmit => {
                let form = &self.onboard;
                let (Some(personality), Some(persona)) = (form.personality, form.persona) else {
                    return CosmicTask::none();
                };
                if form.name.trim().is_empty() || form.submitting {
                    return CosmicTask::none();
                }
                let request = OnboardingRequest {
                    name: form.name.trim().to_string(),
                    timezone: TIMEZONES[form.timezone_idx.min(TIMEZONES.len() - 1)].to_string(),
                    personality_type: PERSONALITY_TYPES
                        [personality.min(PERSONALITY_TYPES.len() - 1)]
                    .to_string(),
                    selected_persona: persona.as_str().to_string(),
                };
                self.onboard.submitting = true;
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move {
                        let resp = client.onboard(&request).await?;
                        if let Err(e) = token::store_token(&resp.token).await {
                            log::warn!("Failed to persist session token: {}", e);
                        }
                        let session = Session {
                            user: resp.user,
                            trial: TrialStatus::fresh_trial(),
                        };
                        Ok((resp.token, session, resp.message))
                    },
                    |result| cosmic::Action::App(Message::OnboardFinished(result)),
                );
            }

            Message::OnboardFinished(Ok((new_token, session, welcome))) => {
                self.onboard = OnboardForm::default();
                self.token = Some(new_token.clone());
                self.client.set_token(Some(new_token));
                self.session = Some(session);
                self.persona_message = welcome;
                self.screen = Screen::Main;
                return self.reload_visible();
            }

            Message::OnboardFinished(Err(e)) => {
                self.onboard.submitting = false;
                log::error!("Onboarding failed: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }

            // --- Paywall ---
            Message::SelectPlan(plan) => self.selected_plan = plan,

            Message::Subscribe => {
                if self.paying {
                    return CosmicTask::none();
                }
                self.paying = true;
                let client = self.client.clone();
                let plan = self.selected_plan;
                return CosmicTask::perform(
                    async move { client.subscribe(plan).await },
                    |result| cosmic::Action::App(Message::SubscribeFinished(result)),
                );
            }

            Message::SubscribeFinished(Ok(message)) => {
                self.paying = false;
                if let Some(session) = &mut self.session {
                    session.trial = TrialStatus::subscribed();
                }
                self.notice = Some(Notice::Info(
                    message.unwrap_or_else(|| fl!("notice-subscribed")),
                ));
                self.screen = Screen::Main;
                return self.reload_visible();
            }

            Message::SubscribeFinished(Err(e)) => {
                self.paying = false;
                log::error!("Subscription failed: {}", e);
                self.notice = Some(Notice::Error(fl!("notice-payment-failed")));
            }

            // --- Session ---
            Message::Logout => return self.force_logout(),

            Message::PersonaSelected(persona) => {
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move { client.update_persona(persona).await },
                    move |result| cosmic::Action::App(Message::PersonaUpdated(persona, result)),
                );
            }

            Message::PersonaUpdated(persona, Ok(welcome)) => {
                if let Some(session) = &mut self.session {
                    session.user.selected_persona = persona;
                }
                if welcome.is_some() {
                    self.persona_message = welcome;
                }
            }

            Message::PersonaUpdated(_, Err(e)) => return self.handle_api_error(e),

            Message::PersonaMessageFetched(Ok(message)) => {
                self.persona_message = Some(message);
            }

            Message::PersonaMessageFetched(Err(e)) => {
                // Companion chatter is decoration; never a notice.
                log::debug!("Persona message unavailable: {}", e);
            }

            // --- Calendar ---
            Message::SetCalendarView(view) => {
                self.calendar_view = view;
                return self.reload_visible();
            }

            Message::CalendarPrev => {
                self.reference_date =
                    calendar::step(self.calendar_view, self.reference_date, false);
                self.selected_day = None;
                return self.reload_visible();
            }

            Message::CalendarNext => {
                self.reference_date = calendar::step(self.calendar_view, self.reference_date, true);
                self.selected_day = None;
                return self.reload_visible();
            }

            Message::CalendarToday => {
                let today = chrono::Local::now().date_naive();
                self.reference_date = today;
                self.selected_day = Some(today);
                return self.reload_visible();
            }

            Message::CalendarSelectDay(date) => {
                if self.selected_day == Some(date) {
                    self.selected_day = None;
                } else {
                    self.selected_day = Some(date);
                }
            }

            Message::ReloadTasks => return self.reload_visible(),

            Message::TasksLoaded(seq, result) => {
                if !self.load_seq.accepts(seq) {
                    log::debug!("Discarding stale task load #{}", seq);
                    return CosmicTask::none();
                }
                self.loading = false;
                match result {
                    Ok(tasks) => self.tasks = tasks,
                    // Keep the previous list; never overwrite with partial state.
                    Err(e) => return self.handle_api_error(e),
                }
            }

            // --- Drafts ---
            Message::NewTask => {
                if self.screen != Screen::Main {
                    return CosmicTask::none();
                }
                let now = chrono::Local::now().naive_local();
                self.open_draft(TaskDraft::for_slot(now, now + Duration::hours(1)));
            }

            Message::NewAllDayTask => {
                let tomorrow = chrono::Local::now().date_naive() + Duration::days(1);
                let start = tomorrow.and_hms_opt(0, 0, 0).unwrap();
                self.open_draft(TaskDraft::for_slot(start, start + Duration::hours(24)));
            }

            Message::OpenSlotDraft(start, end) => {
                self.open_draft(TaskDraft::for_slot(start, end));
            }

            Message::EditTask(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id.as_deref() == Some(&id)) {
                    self.open_draft(TaskDraft::from_task(task));
                }
            }

            // --- Day planning ---
            Message::PlanDay => {
                let date = self.selected_day.unwrap_or(self.reference_date);
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move { client.plan_day(date).await },
                    |result| cosmic::Action::App(Message::DayPlanned(result)),
                );
            }

            Message::DayPlanned(Ok((timeline, message))) => {
                self.timeline = timeline;
                if message.is_some() {
                    self.persona_message = message;
                }
            }

            Message::DayPlanned(Err(e)) => return self.handle_api_error(e),

            // --- Editor fields ---
            Message::EditorTabSelected(tab) => self.form_tab = tab,

            Message::DraftTitle(value) => self.with_draft(|d| d.title = value),
            Message::DraftDescription(value) => self.with_draft(|d| d.description = value),
            Message::DraftCategory(category) => self.with_draft(|d| d.category = category),
            Message::DraftPriority(priority) => self.with_draft(|d| d.priority = priority),
            Message::DraftLocation(value) => self.with_draft(|d| d.location = value),
            Message::DraftAllDay(all_day) => self.with_draft(|d| d.all_day = all_day),
            Message::DraftStartDate(value) => self.with_draft(|d| d.start_date = value),
            Message::DraftStartTime(value) => self.with_draft(|d| d.start_time = value),
            Message::DraftEndDate(value) => self.with_draft(|d| d.end_date = value),
            Message::DraftEndTime(value) => self.with_draft(|d| d.end_time = value),
            Message::DraftDeadline(value) => self.with_draft(|d| d.deadline = value),
            Message::DraftReminder(value) => self.with_draft(|d| d.reminder = value),
            Message::DraftRepeat(repeat) => self.with_draft(|d| d.repeat = repeat),
            Message::DraftTimerMinutes(value) => self.with_draft(|d| d.timer_minutes = value),
            Message::DraftTags(value) => self.with_draft(|d| d.tags = value),
            Message::DraftNotes(value) => self.with_draft(|d| d.notes = value),

            Message::DraftSubmit => {
                let Some(draft) = self.draft.clone() else {
                    return CosmicTask::none();
                };
                match draft.validate() {
                    Err(e) => {
                        // Rejected locally; no request leaves the client.
                        self.notice = Some(Notice::Error(e.to_string()));
                    }
                    Ok(task) => {
                        let client = self.client.clone();
                        return match task.id.clone() {
                            Some(id) => CosmicTask::perform(
                                async move { client.update_task(&id, &task).await },
                                |result| cosmic::Action::App(Message::TaskSaved(result)),
                            ),
                            None => CosmicTask::perform(
                                async move {
                                    client.create_task(&task).await.map(|(_, message)| message)
                                },
                                |result| cosmic::Action::App(Message::TaskSaved(result)),
                            ),
                        };
                    }
                }
            }

            Message::TaskSaved(Ok(message)) => {
                self.close_drawer();
                if message.is_some() {
                    self.persona_message = message;
                }
                self.notice = Some(Notice::Info(fl!("notice-task-saved")));
                return self.reload_visible();
            }

            Message::TaskSaved(Err(e)) => return self.handle_api_error(e),

            Message::DraftCancel => self.close_drawer(),

            Message::DraftDelete => {
                let Some(id) = self.draft.as_ref().and_then(|d| d.id.clone()) else {
                    return CosmicTask::none();
                };
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move { client.delete_task(&id).await },
                    |result| cosmic::Action::App(Message::TaskDeleted(result)),
                );
            }

            Message::TaskDeleted(Ok(())) => {
                self.close_drawer();
                self.notice = Some(Notice::Info(fl!("notice-task-deleted")));
                return self.reload_visible();
            }

            Message::TaskDeleted(Err(e)) => return self.handle_api_error(e),

            // --- Focus countdown ---
            Message::TimerStart => {
                if let Some(minutes) = self
                    .draft
                    .as_ref()
                    .and_then(|d| d.timer_minutes.trim().parse::<u32>().ok())
                {
                    if minutes > 0 {
                        self.countdown = Some(Countdown::start(minutes));
                    }
                }
            }

            Message::TimerStop => self.countdown = None,

            Message::TimerTick => {
                if let Some(countdown) = &mut self.countdown {
                    if countdown.tick() {
                        self.countdown = None;
                        self.notice = Some(Notice::Info(fl!("notice-timer-done")));
                    }
                }
            }

            // --- Explore ---
            Message::ExploreLoaded { nearby, holidays } => {
                if matches!(nearby.as_ref(), Err(ApiError::Unauthorized))
                    || matches!(holidays.as_ref(), Err(ApiError::Unauthorized))
                {
                    return self.force_logout();
                }
                match nearby {
                    Ok((places, message)) => {
                        self.places = places;
                        self.places_fallback = false;
                        if message.is_some() {
                            self.persona_message = message;
                        }
                    }
                    Err(e) => {
                        log::warn!("Nearby discovery unavailable: {}", e);
                        self.places = explore::fallback_places();
                        self.places_fallback = true;
                    }
                }
                match holidays {
                    Ok(holidays) => self.holidays = holidays,
                    Err(e) => log::warn!("Holiday lookup failed: {}", e),
                }
            }

            Message::UserPlacesLoaded(Ok(places)) => self.user_places = places,
            Message::UserPlacesLoaded(Err(e)) => return self.handle_api_error(e),

            Message::AddPlaceToCalendar(idx) => {
                let Some(place) = self.places.get(idx) else {
                    return CosmicTask::none();
                };
                let today = chrono::Local::now().date_naive();
                let task = explore::visit_task(place, today);
                return self.submit_recommendation(task);
            }

            Message::AddHolidayToCalendar(idx) => {
                let Some(holiday) = self.holidays.get(idx) else {
                    return CosmicTask::none();
                };
                let task = explore::holiday_task(holiday);
                return self.submit_recommendation(task);
            }

            Message::RecommendationAdded(Ok((confirmation, message))) => {
                self.notice = Some(Notice::Info(confirmation));
                if message.is_some() {
                    self.persona_message = message;
                }
            }

            Message::RecommendationAdded(Err(e)) => return self.handle_api_error(e),

            // --- User-place form ---
            Message::OpenPlaceForm(editing) => {
                let form = match editing.and_then(|idx| self.user_places.get(idx)) {
                    Some(place) if !place.is_default => PlaceForm::from_place(place),
                    Some(_) => return CosmicTask::none(),
                    None => PlaceForm::blank(
                        self.session
                            .as_ref()
                            .and_then(|s| s.user.city.clone())
                            .unwrap_or_default(),
                    ),
                };
                self.draft = None;
                self.countdown = None;
                self.place_form = Some(form);
                self.core.window.show_context = true;
            }

            Message::PlaceTitle(value) => self.with_place_form(|f| f.title = value),
            Message::PlaceDescription(value) => self.with_place_form(|f| f.description = value),
            Message::PlaceKindSelected(idx) => self.with_place_form(|f| f.kind_idx = idx),
            Message::PlaceLocation(value) => self.with_place_form(|f| f.location = value),
            Message::PlaceCity(value) => self.with_place_form(|f| f.city = value),
            Message::PlaceDate(value) => self.with_place_form(|f| f.date = value),
            Message::PlaceRating(value) => self.with_place_form(|f| f.rating = value),

            Message::PlaceSubmit => {
                let Some(form) = &self.place_form else {
                    return CosmicTask::none();
                };
                if form.title.trim().is_empty() || form.location.trim().is_empty() {
                    self.notice = Some(Notice::Error(fl!("notice-place-required")));
                    return CosmicTask::none();
                }
                let place = UserPlace {
                    id: form.editing.clone(),
                    title: form.title.trim().to_string(),
                    description: if form.description.trim().is_empty() {
                        None
                    } else {
                        Some(form.description.trim().to_string())
                    },
                    kind: PlaceKind::ALL[form.kind_idx.min(PlaceKind::ALL.len() - 1)],
                    location: form.location.trim().to_string(),
                    city: form.city.trim().to_string(),
                    date: if form.date.trim().is_empty() {
                        None
                    } else {
                        Some(form.date.trim().to_string())
                    },
                    rating: form.rating.trim().parse().ok(),
                    is_default: false,
                };
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move {
                        match place.id.clone() {
                            Some(id) => client.update_place(&id, &place).await,
                            None => client.create_place(&place).await,
                        }
                    },
                    |result| cosmic::Action::App(Message::PlaceSaved(result)),
                );
            }

            Message::PlaceCancel => self.close_drawer(),

            Message::PlaceDelete(idx) => {
                let Some(place) = self.user_places.get(idx) else {
                    return CosmicTask::none();
                };
                if place.is_default {
                    self.notice = Some(Notice::Error(fl!("notice-place-default")));
                    return CosmicTask::none();
                }
                let Some(id) = place.id.clone() else {
                    return CosmicTask::none();
                };
                let client = self.client.clone();
                return CosmicTask::perform(
                    async move { client.delete_place(&id).await },
                    |result| cosmic::Action::App(Message::PlaceDeleted(result)),
                );
            }

            Message::PlaceSaved(Ok(())) => {
                self.close_drawer();
                self.notice = Some(Notice::Info(fl!("notice-place-saved")));
                return self.reload_user_places();
            }

            Message::PlaceSaved(Err(e)) => return self.handle_api_error(e),

            Message::PlaceDeleted(Ok(())) => {
                self.notice = Some(Notice::Info(fl!("notice-place-deleted")));
                return self.reload_user_places();
            }

            Message::PlaceDeleted(Err(e)) => return self.handle_api_error(e),

            // --- Settings ---
            Message::SetServerUrl(url) => {
                self.config.server_url = url;
                self.save_config();
                self.rebuild_client();
            }

            Message::SetDefaultView(idx) => {
                let view = CalendarView::ALL[idx.min(CalendarView::ALL.len() - 1)];
                self.config.default_view = view;
                self.calendar_view = view;
                self.save_config();
                return self.reload_visible();
            }

            Message::SetWeekStart(idx) => {
                let all = cadence::core::calendar::WeekStart::ALL;
                self.config.week_start = all[idx.min(all.len() - 1)];
                self.save_config();
                return self.reload_visible();
            }

            Message::LatitudeInput(value) => self.latitude_input = value,
            Message::LongitudeInput(value) => self.longitude_input = value,

            Message::ApplyLocation => {
                let lat = self.latitude_input.trim();
                let lng = self.longitude_input.trim();
                if lat.is_empty() && lng.is_empty() {
                    self.config.latitude = None;
                    self.config.longitude = None;
                } else {
                    match (lat.parse::<f64>(), lng.parse::<f64>()) {
                        (Ok(lat), Ok(lng)) => {
                            self.config.latitude = Some(lat);
                            self.config.longitude = Some(lng);
                        }
                        _ => {
                            self.notice = Some(Notice::Error(fl!("notice-bad-coordinates")));
                            return CosmicTask::none();
                        }
                    }
                }
                self.save_config();
                if self.active_tab == MainTab::Explore {
                    return self.load_explore();
                }
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                cadence::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }

            // --- Notices ---
            Message::DismissNotice => self.notice = None,

            Message::TokenCleared => {}
        }

        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        match self.screen {
            Screen::Loading => container(text::body(fl!("loading")))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Screen::Onboarding => pages::onboarding::onboarding_view(&self.onboard),
            Screen::Paywall => match &self.session {
                Some(session) => {
                    pages::paywall::paywall_view(session, self.selected_plan, self.paying)
                }
                None => pages::onboarding::onboarding_view(&self.onboard),
            },
            Screen::Main => self.main_view(),
        }
    }
}

impl Cadence {
    fn main_view(&self) -> Element<'_, Message> {
        let Some(session) = &self.session else {
            return container(text::body(fl!("loading")))
                .center_x(Length::Fill)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        };

        let mut content = column().spacing(12);

        if let Some(message) = &self.persona_message {
            content = content.push(persona_banner(session.user.selected_persona, message));
        }

        if let Some(notice) = &self.notice {
            content = content.push(self.notice_row(notice));
        }

        let page = match self.active_tab {
            MainTab::Calendar => pages::calendar::calendar_view(
                self.calendar_view,
                self.reference_date,
                self.selected_day,
                self.config.week_start,
                &self.tasks,
                &self.timeline,
                self.loading,
            ),
            MainTab::Explore => pages::explore::explore_view(
                session.user.city.as_deref().unwrap_or(""),
                &self.places,
                self.places_fallback,
                &self.holidays,
                &self.user_places,
            ),
            MainTab::Settings => pages::settings::settings_view(
                &self.config,
                session,
                &self.latitude_input,
                &self.longitude_input,
            ),
        };
        content = content.push(page);

        container(content.padding(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn notice_row(&self, notice: &Notice) -> Element<'_, Message> {
        let (icon_name, body) = match notice {
            Notice::Info(message) => ("emblem-ok-symbolic", message.clone()),
            Notice::Error(message) => ("dialog-warning-symbolic", message.clone()),
        };
        container(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(icon::from_name(icon_name).size(16).icon())
                .push(text::body(body).width(Length::Fill))
                .push(
                    button::icon(icon::from_name("window-close-symbolic"))
                        .on_press(Message::DismissNotice),
                ),
        )
        .padding(8)
        .width(Length::Fill)
        .into()
    }

    fn place_form_view(&self) -> cosmic::widget::column::Column<'_, Message> {
        let mut content = column().spacing(16);
        let Some(form) = &self.place_form else {
            return content;
        };

        content = content.push(text::title4(fl!("place-title")));
        content = content.push(
            text_input::text_input(fl!("place-title-placeholder"), &form.title)
                .on_input(Message::PlaceTitle)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-description")));
        content = content.push(
            text_input::text_input(fl!("place-description-placeholder"), &form.description)
                .on_input(Message::PlaceDescription)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-kind")));
        content = content.push(
            cosmic::widget::dropdown(
                PlaceKind::ALL
                    .iter()
                    .map(|k| k.label().to_string())
                    .collect::<Vec<String>>(),
                Some(form.kind_idx.min(PlaceKind::ALL.len() - 1)),
                Message::PlaceKindSelected,
            )
            .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-location")));
        content = content.push(
            text_input::text_input(fl!("place-location-placeholder"), &form.location)
                .on_input(Message::PlaceLocation)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-city")));
        content = content.push(
            text_input::text_input(fl!("place-city-placeholder"), &form.city)
                .on_input(Message::PlaceCity)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-date")));
        content = content.push(
            text_input::text_input(fl!("place-date-placeholder"), &form.date)
                .on_input(Message::PlaceDate)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("place-rating")));
        content = content.push(
            text_input::text_input("4.5", &form.rating)
                .on_input(Message::PlaceRating)
                .width(Length::Fixed(80.0)),
        );

        content.push(
            row()
                .spacing(8)
                .push(button::suggested(fl!("place-save")).on_press(Message::PlaceSubmit))
                .push(button::standard(fl!("editor-cancel")).on_press(Message::PlaceCancel)),
        )
    }

    fn with_draft(&mut self, f: impl FnOnce(&mut TaskDraft)) {
        if let Some(draft) = &mut self.draft {
            f(draft);
        }
    }

    fn with_place_form(&mut self, f: impl FnOnce(&mut PlaceForm)) {
        if let Some(form) = &mut self.place_form {
            f(form);
        }
    }

    fn open_draft(&mut self, draft: TaskDraft) {
        self.place_form = None;
        self.draft = Some(draft);
        self.form_tab = FormTab::Basic;
        self.countdown = None;
        self.core.window.show_context = true;
    }

    fn close_drawer(&mut self) {
        self.draft = None;
        self.place_form = None;
        self.countdown = None;
        self.core.window.show_context = false;
    }

    /// Reload the visible range. Each call bumps the sequence number so that
    /// only the newest response is ever applied.
    fn reload_visible(&mut self) -> CosmicTask<Message> {
        if self.session.is_none() {
            return CosmicTask::none();
        }
        let seq = self.load_seq.issue();
        self.loading = true;
        let (start, end) = calendar::visible_range(
            self.calendar_view,
            self.reference_date,
            self.config.week_start,
        );
        let client = self.client.clone();
        CosmicTask::perform(
            async move { client.list_tasks(start, end).await },
            move |result| cosmic::Action::App(Message::TasksLoaded(seq, result)),
        )
    }

    fn reload_user_places(&mut self) -> CosmicTask<Message> {
        let client = self.client.clone();
        CosmicTask::perform(
            async move { client.list_places().await },
            |result| cosmic::Action::App(Message::UserPlacesLoaded(result)),
        )
    }

    fn load_explore(&mut self) -> CosmicTask<Message> {
        if self.session.is_none() {
            return CosmicTask::none();
        }
        let today = chrono::Local::now().date_naive();
        let mut batch: Vec<CosmicTask<Message>> = Vec::new();

        match self.config.coordinates() {
            Some((lat, lng)) => {
                let client = self.client.clone();
                batch.push(CosmicTask::perform(
                    async move {
                        let (nearby, holidays) =
                            futures::future::join(client.nearby_places(lat, lng), client.holidays(today))
                                .await;
                        Message::ExploreLoaded { nearby, holidays }
                    },
                    cosmic::Action::App,
                ));
            }
            None => {
                // No configured location: placeholder suggestions, live holidays.
                self.places = explore::fallback_places();
                self.places_fallback = true;
                let client = self.client.clone();
                batch.push(CosmicTask::perform(
                    async move { client.holidays(today).await },
                    |holidays| {
                        cosmic::Action::App(Message::ExploreLoaded {
                            nearby: Err(ApiError::Validation("location not configured".into())),
                            holidays,
                        })
                    },
                ));
            }
        }

        batch.push(self.reload_user_places());
        batch.push(self.fetch_persona_message("explore_event"));
        CosmicTask::batch(batch)
    }

    fn fetch_persona_message(&self, kind: &'static str) -> CosmicTask<Message> {
        let client = self.client.clone();
        CosmicTask::perform(
            async move { client.persona_message(kind).await },
            |result| cosmic::Action::App(Message::PersonaMessageFetched(result)),
        )
    }

    fn submit_recommendation(&self, task: cadence::core::task::Task) -> CosmicTask<Message> {
        let client = self.client.clone();
        let title = task.title.clone();
        CosmicTask::perform(
            async move {
                let (_, message) = client.create_task(&task).await?;
                Ok((format!("Added \"{}\" to your calendar", title), message))
            },
            |result| cosmic::Action::App(Message::RecommendationAdded(result)),
        )
    }

    fn handle_api_error(&mut self, error: ApiError) -> CosmicTask<Message> {
        match error {
            ApiError::Unauthorized => self.force_logout(),
            other => {
                log::error!("Request failed: {}", other);
                self.loading = false;
                self.notice = Some(Notice::Error(other.to_string()));
                CosmicTask::none()
            }
        }
    }

    /// Clear the token and all in-memory state, returning to onboarding.
    /// Safe to call repeatedly.
    fn force_logout(&mut self) -> CosmicTask<Message> {
        self.token = None;
        self.client.set_token(None);
        self.session = None;
        self.tasks.clear();
        self.timeline.clear();
        self.places.clear();
        self.places_fallback = false;
        self.holidays.clear();
        self.user_places.clear();
        self.close_drawer();
        self.persona_message = None;
        self.notice = None;
        self.screen = Screen::Onboarding;
        self.onboard = OnboardForm::default();

        CosmicTask::perform(
            async move {
                if let Err(e) = token::delete_token().await {
                    log::warn!("Failed to clear stored token: {}", e);
                }
            },
            |_| cosmic::Action::App(Message::TokenCleared),
        )
    }

    fn rebuild_client(&mut self) {
        let mut client = ApiClient::new(&self.config.server_url);
        client.set_token(self.token.clone());
        self.client = client;
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}
