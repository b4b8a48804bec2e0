use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::Element;

use cadence::core::explore::{Holiday, Place, UserPlace};

use crate::fl;
use crate::message::Message;

/// How many suggestions each list shows; clutter is bounded, not paginated.
pub const NEARBY_SHOWN: usize = 3;
pub const HOLIDAYS_SHOWN: usize = 2;

pub fn explore_view<'a>(
    city: &str,
    places: &'a [Place],
    places_fallback: bool,
    holidays: &'a [Holiday],
    user_places: &'a [UserPlace],
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    let heading = if city.is_empty() {
        fl!("explore-heading")
    } else {
        format!("Explore {}", city)
    };
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                column()
                    .spacing(2)
                    .push(text::title4(heading))
                    .push(text::caption(fl!("explore-subtitle")))
                    .width(Length::Fill),
            )
            .push(button::suggested(fl!("explore-add-place")).on_press(Message::OpenPlaceForm(None))),
    );

    // Nearby places
    let mut nearby = column().spacing(4).push(text::title4(fl!("explore-nearby")));
    if places_fallback {
        nearby = nearby.push(text::caption(fl!("explore-fallback-note")));
    }
    if places.is_empty() {
        nearby = nearby.push(text::caption(fl!("explore-nearby-empty")));
    }
    for (idx, place) in places.iter().take(NEARBY_SHOWN).enumerate() {
        nearby = nearby.push(place_row(idx, place));
    }
    content = content.push(nearby);

    // Upcoming holidays
    let mut upcoming = column()
        .spacing(4)
        .push(text::title4(fl!("explore-holidays")));
    if holidays.is_empty() {
        upcoming = upcoming.push(text::caption(fl!("explore-holidays-empty")));
    }
    for (idx, holiday) in holidays.iter().take(HOLIDAYS_SHOWN).enumerate() {
        upcoming = upcoming.push(holiday_row(idx, holiday));
    }
    content = content.push(upcoming);

    // User-curated places
    let mut curated = column()
        .spacing(4)
        .push(text::title4(fl!("explore-saved-places")));
    if user_places.is_empty() {
        curated = curated.push(text::caption(fl!("explore-saved-empty")));
    }
    for (idx, place) in user_places.iter().enumerate() {
        curated = curated.push(user_place_row(idx, place));
    }
    content = content.push(curated);

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn place_row(idx: usize, place: &Place) -> Element<'static, Message> {
    let mut detail = place.distance.clone().unwrap_or_else(|| "Nearby".to_string());
    if let Some(rating) = place.rating {
        detail = format!("{} · ★ {:.1}", detail, rating);
    }

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(icon::from_name(place.kind.icon_name()).size(16).icon())
        .push(
            column()
                .spacing(2)
                .push(text::body(place.name.clone()))
                .push(text::caption(detail))
                .width(Length::Fill),
        )
        .push(
            button::icon(icon::from_name("list-add-symbolic"))
                .on_press(Message::AddPlaceToCalendar(idx)),
        )
        .into()
}

fn holiday_row(idx: usize, holiday: &Holiday) -> Element<'static, Message> {
    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(icon::from_name("x-office-calendar-symbolic").size(16).icon())
        .push(
            column()
                .spacing(2)
                .push(text::body(holiday.name.clone()))
                .push(text::caption(holiday.date.format("%b %e").to_string()))
                .width(Length::Fill),
        )
        .push(
            button::icon(icon::from_name("list-add-symbolic"))
                .on_press(Message::AddHolidayToCalendar(idx)),
        )
        .into()
}

fn user_place_row(idx: usize, place: &UserPlace) -> Element<'static, Message> {
    let mut caption = place.location.clone();
    if let Some(ref date) = place.date {
        caption = format!("{} · {}", caption, date);
    }
    if let Some(rating) = place.rating {
        caption = format!("{} · ★ {:.1}", caption, rating);
    }

    let mut r = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(icon::from_name(place.kind.icon_name()).size(16).icon())
        .push(
            column()
                .spacing(2)
                .push(text::body(place.title.clone()))
                .push(text::caption(caption))
                .width(Length::Fill),
        );

    if place.is_default {
        r = r.push(text::caption(fl!("explore-default-badge")));
    } else {
        r = r
            .push(
                button::icon(icon::from_name("document-edit-symbolic"))
                    .on_press(Message::OpenPlaceForm(Some(idx))),
            )
            .push(
                button::icon(icon::from_name("edit-delete-symbolic"))
                    .on_press(Message::PlaceDelete(idx)),
            );
    }

    r.into()
}
