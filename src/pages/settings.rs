use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use cadence::config::CadenceConfig;
use cadence::core::calendar::{CalendarView, WeekStart};
use cadence::core::session::{Persona, Session};

use crate::fl;
use crate::message::Message;

pub fn settings_view<'a>(
    config: &'a CadenceConfig,
    session: &'a Session,
    latitude_input: &'a str,
    longitude_input: &'a str,
) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    // --- Companion persona ---
    content = content.push(text::title4(fl!("settings-persona-heading")));
    for persona in Persona::ALL {
        let active = session.user.selected_persona == *persona;
        let label = format!("{}  {}", persona.emoji(), persona.label());
        let btn = if active {
            button::suggested(label)
        } else {
            button::standard(label)
        };
        content = content.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(btn.on_press(Message::PersonaSelected(*persona)).width(Length::Fill))
                .push(if active {
                    text::caption(fl!("settings-persona-active"))
                } else {
                    text::caption("")
                }),
        );
    }

    // --- Calendar ---
    content = content.push(text::title4(fl!("settings-calendar-heading")));
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-default-view")).width(Length::Fill))
            .push(cosmic::widget::dropdown(
                CalendarView::ALL
                    .iter()
                    .map(|v| v.label().to_string())
                    .collect::<Vec<String>>(),
                CalendarView::ALL.iter().position(|v| *v == config.default_view),
                Message::SetDefaultView,
            )),
    );
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-week-start")).width(Length::Fill))
            .push(cosmic::widget::dropdown(
                WeekStart::ALL
                    .iter()
                    .map(|w| w.label().to_string())
                    .collect::<Vec<String>>(),
                WeekStart::ALL.iter().position(|w| *w == config.week_start),
                Message::SetWeekStart,
            )),
    );

    // --- Backend ---
    content = content.push(text::title4(fl!("settings-server-heading")));
    content = content.push(
        text_input::text_input("http://localhost:8001", &config.server_url)
            .on_input(Message::SetServerUrl)
            .width(Length::Fill),
    );

    // --- Location for discovery ---
    content = content.push(text::title4(fl!("settings-location-heading")));
    content = content.push(text::caption(fl!("settings-location-note")));
    content = content.push(
        row()
            .spacing(8)
            .push(
                text_input::text_input(fl!("settings-latitude"), latitude_input)
                    .on_input(Message::LatitudeInput)
                    .width(Length::Fill),
            )
            .push(
                text_input::text_input(fl!("settings-longitude"), longitude_input)
                    .on_input(Message::LongitudeInput)
                    .width(Length::Fill),
            )
            .push(button::standard(fl!("settings-location-apply")).on_press(Message::ApplyLocation)),
    );

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    // --- Profile ---
    content = content.push(text::title4(fl!("settings-profile-heading")));
    content = content.push(profile_line(fl!("settings-profile-name"), session.user.name.clone()));
    content = content.push(profile_line(
        fl!("settings-profile-location"),
        session
            .user
            .city
            .clone()
            .unwrap_or_else(|| session.user.timezone.clone()),
    ));
    content = content.push(profile_line(
        fl!("settings-profile-personality"),
        session.user.personality_type.clone(),
    ));
    if let Some(ref created) = session.user.created_at {
        content = content.push(profile_line(fl!("settings-profile-since"), created.clone()));
    }
    let membership = if session.trial.subscription_active {
        fl!("settings-membership-premium")
    } else {
        format!("{} days left in trial", session.trial.days_left)
    };
    content = content.push(profile_line(fl!("settings-profile-membership"), membership));

    content = content.push(button::standard(fl!("settings-logout")).on_press(Message::Logout));

    // --- About ---
    content = content.push(text::title4(fl!("settings-about-heading")));
    content = content.push(text::caption(fl!("settings-about-line")));

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn profile_line(label: String, value: String) -> Element<'static, Message> {
    row()
        .spacing(8)
        .push(text::caption(label).width(Length::Fixed(140.0)))
        .push(text::body(value))
        .into()
}
