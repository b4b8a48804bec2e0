use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, icon, row, text};
use cosmic::Element;

use cadence::core::event::DisplayEvent;

use crate::message::Message;

/// One calendar row: time column, category icon, title, presence markers,
/// and an edit shortcut for saved tasks.
pub fn event_row(event: &DisplayEvent) -> Element<'static, Message> {
    let time_str = if event.all_day {
        "All day".to_string()
    } else {
        event.start.format("%H:%M").to_string()
    };

    let mut r = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::caption(time_str).width(Length::Fixed(64.0)))
        .push(
            icon::from_name(event.resource.category.icon_name())
                .size(16)
                .icon(),
        )
        .push(text::body(event.title.clone()).width(Length::Fill));

    if event.resource.completed {
        r = r.push(icon::from_name("object-select-symbolic").size(16).icon());
    }
    if event.resource.has_deadline {
        r = r.push(icon::from_name("appointment-soon-symbolic").size(16).icon());
    }
    if event.resource.has_reminder {
        r = r.push(icon::from_name("alarm-symbolic").size(16).icon());
    }
    if event.resource.has_timer {
        r = r.push(icon::from_name("hourglass-symbolic").size(16).icon());
    }

    if let Some(id) = event.id.clone() {
        r = r.push(
            button::icon(icon::from_name("document-edit-symbolic"))
                .on_press(Message::EditTask(id)),
        );
    }

    r.into()
}
