use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use cadence::core::session::{Persona, PERSONALITY_TYPES, TIMEZONES};

use crate::fl;
use crate::message::Message;

/// Three-step onboarding wizard state, owned by the application shell.
pub struct OnboardForm {
    pub step: u8,
    pub name: String,
    pub timezone_idx: usize,
    pub personality: Option<usize>,
    pub persona: Option<Persona>,
    pub submitting: bool,
}

impl Default for OnboardForm {
    fn default() -> Self {
        Self {
            step: 1,
            name: String::new(),
            // EST, matching the backend's sign-up default.
            timezone_idx: 3,
            personality: None,
            persona: None,
            submitting: false,
        }
    }
}

impl OnboardForm {
    pub fn step_valid(&self) -> bool {
        match self.step {
            1 => !self.name.trim().is_empty(),
            2 => self.personality.is_some(),
            3 => self.persona.is_some(),
            _ => false,
        }
    }
}

pub fn onboarding_view(form: &OnboardForm) -> Element<'_, Message> {
    let mut content = column().spacing(16);

    content = content.push(text::title4(fl!("onboarding-welcome")));
    content = content.push(text::body(fl!("onboarding-tagline")));
    content = content.push(text::caption(format!("Step {} of 3", form.step)));

    match form.step {
        1 => {
            content = content.push(text::title4(fl!("onboarding-name-heading")));
            content = content.push(
                text_input::text_input(fl!("onboarding-name-placeholder"), &form.name)
                    .on_input(Message::OnboardNameInput)
                    .on_submit(|_| Message::OnboardNext)
                    .width(Length::Fill),
            );

            content = content.push(text::title4(fl!("onboarding-timezone")));
            content = content.push(
                cosmic::widget::dropdown(
                    TIMEZONES.iter().map(|tz| tz.to_string()).collect::<Vec<String>>(),
                    Some(form.timezone_idx),
                    Message::OnboardTimezoneSelected,
                )
                .width(Length::Fill),
            );
        }
        2 => {
            content = content.push(text::title4(fl!("onboarding-personality-heading")));
            for (idx, kind) in PERSONALITY_TYPES.iter().enumerate() {
                let btn = if form.personality == Some(idx) {
                    button::suggested(*kind)
                } else {
                    button::standard(*kind)
                };
                content = content.push(
                    btn.on_press(Message::OnboardPersonalitySelected(idx))
                        .width(Length::Fill),
                );
            }
        }
        _ => {
            content = content.push(text::title4(fl!("onboarding-persona-heading")));
            for persona in Persona::ALL {
                content = content.push(persona_card(*persona, form.persona == Some(*persona)));
            }
        }
    }

    // Back / Next / Submit
    let mut nav = row().spacing(8);
    if form.step > 1 {
        nav = nav.push(button::standard(fl!("onboarding-back")).on_press(Message::OnboardBack));
    }
    if form.step < 3 {
        let mut next = button::suggested(fl!("onboarding-next"));
        if form.step_valid() && !form.submitting {
            next = next.on_press(Message::OnboardNext);
        }
        nav = nav.push(next);
    } else {
        let label = if form.submitting {
            fl!("onboarding-submitting")
        } else {
            fl!("onboarding-submit")
        };
        let mut submit = button::suggested(label);
        if form.step_valid() && !form.submitting {
            submit = submit.on_press(Message::OnboardSubmit);
        }
        nav = nav.push(submit);
    }
    content = content.push(nav);

    content = content.push(text::caption(fl!("onboarding-trial-note")));

    container(scrollable(
        container(content)
            .padding(32)
            .max_width(480.0)
            .width(Length::Fill),
    ))
    .center_x(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn persona_card(persona: Persona, selected: bool) -> Element<'static, Message> {
    let body = row()
        .spacing(12)
        .align_y(Alignment::Center)
        .push(text::title4(persona.emoji().to_string()))
        .push(
            column()
                .spacing(2)
                .push(text::body(persona.label()))
                .push(text::caption(persona.description()))
                .push(text::caption(format!("\u{201c}{}\u{201d}", persona.sample_line())))
                .width(Length::Fill),
        );

    let btn = if selected {
        button::custom(body).class(cosmic::theme::Button::Suggested)
    } else {
        button::custom(body).class(cosmic::theme::Button::Standard)
    };
    btn.on_press(Message::OnboardPersonaSelected(persona))
        .width(Length::Fill)
        .into()
}
