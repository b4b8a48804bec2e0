use cosmic::iced::{Alignment, Length};
use cosmic::widget::{container, row, text};
use cosmic::Element;

use cadence::core::session::Persona;

use crate::message::Message;

/// The companion's latest message, shown above the active page. The text
/// itself always comes from the backend.
pub fn persona_banner(persona: Persona, message: &str) -> Element<'static, Message> {
    container(
        row()
            .spacing(12)
            .align_y(Alignment::Center)
            .push(text::title4(persona.emoji().to_string()))
            .push(text::body(message.to_string()).width(Length::Fill))
            .push(text::caption(persona.label())),
    )
    .padding(12)
    .width(Length::Fill)
    .into()
}
