use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use cadence::core::calendar::{week_bounds, WeekStart};
use cadence::core::event::DisplayEvent;

use crate::components::event_row::event_row;
use crate::fl;
use crate::message::Message;

/// Render the month grid for the month containing `reference`, with an
/// optional detail panel for the selected day. Rows outside the month are
/// skipped so the grid has no empty trailing week.
pub fn month_calendar<'a>(
    reference: NaiveDate,
    selected_day: Option<NaiveDate>,
    week_start: WeekStart,
    today: NaiveDate,
    events: &[DisplayEvent],
) -> Element<'a, Message> {
    let first = reference.with_day(1).unwrap_or(reference);
    let year = first.year();
    let month = first.month();

    let busy_days: HashSet<NaiveDate> = events.iter().map(|e| e.start.date()).collect();

    let labels: &[&str] = match week_start {
        WeekStart::Monday => &["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        WeekStart::Sunday => &["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
    };
    let mut day_labels = row().spacing(0);
    for label in labels {
        day_labels = day_labels.push(day_label(label));
    }

    let mut grid = column().spacing(2).push(day_labels);

    let grid_start = week_bounds(first, week_start).0;

    // Render 6 rows of 7 days
    for week in 0..6 {
        let mut week_row = row().spacing(0);
        let mut any_in_month = false;

        for day_of_week in 0..7 {
            let date = grid_start + chrono::Duration::days(week * 7 + day_of_week);
            let in_month = date.month() == month && date.year() == year;

            if in_month {
                any_in_month = true;
            }

            let cell: Element<'a, Message> = if !in_month {
                container(text::body(" "))
                    .width(Length::FillPortion(1))
                    .center_x(Length::FillPortion(1))
                    .into()
            } else {
                let day_num = date.day().to_string();
                let is_today = date == today;
                let is_busy = busy_days.contains(&date);
                let is_selected = selected_day == Some(date);

                let label = if is_busy {
                    format!("{}\n·", day_num)
                } else {
                    format!("{}\n ", day_num)
                };

                let txt = if is_today {
                    text::body(label).font(cosmic::iced::Font {
                        weight: cosmic::iced::font::Weight::Bold,
                        ..Default::default()
                    })
                } else {
                    text::body(label)
                };

                let cell_content = container(txt.center()).center_x(Length::Fill);

                let btn = if is_selected {
                    button::custom(cell_content)
                        .class(cosmic::theme::Button::Suggested)
                        .on_press(Message::CalendarSelectDay(date))
                        .width(Length::FillPortion(1))
                } else {
                    button::custom(cell_content)
                        .class(cosmic::theme::Button::Text)
                        .on_press(Message::CalendarSelectDay(date))
                        .width(Length::FillPortion(1))
                };

                btn.into()
            };

            week_row = week_row.push(cell);
        }

        if any_in_month {
            grid = grid.push(week_row);
        }
    }

    let mut content = column()
        .spacing(8)
        .push(container(grid).width(Length::Fill).padding(8));

    if let Some(selected) = selected_day {
        for item in day_detail(selected, today, events) {
            content = content.push(item);
        }
    }

    content.into()
}

/// Compact detail panel for the selected day's events, with a shortcut to
/// start a draft on that date.
fn day_detail<'a>(
    date: NaiveDate,
    today: NaiveDate,
    events: &[DisplayEvent],
) -> Vec<Element<'a, Message>> {
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    let header = if date == today {
        format!("{}, {}", fl!("calendar-today"), date.format("%A %b %e"))
    } else if date == today.succ_opt().unwrap_or(today) {
        format!("{}, {}", fl!("calendar-tomorrow"), date.format("%A %b %e"))
    } else {
        date.format("%A, %b %e").to_string()
    };

    let mut day_events: Vec<&DisplayEvent> = events
        .iter()
        .filter(|e| e.start.date() == date)
        .collect();
    day_events.sort_by_key(|e| (!e.all_day, e.start));

    items.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title4(header).width(Length::Fill))
            .push(
                button::standard(fl!("calendar-add-task")).on_press(Message::OpenSlotDraft(
                    date.and_hms_opt(9, 0, 0).unwrap(),
                    date.and_hms_opt(10, 0, 0).unwrap(),
                )),
            )
            .into(),
    );

    if day_events.is_empty() {
        items.push(text::caption(fl!("calendar-day-empty")).into());
        return items;
    }

    for event in &day_events {
        items.push(event_row(event));
    }

    items
}

fn day_label(label: &str) -> Element<'_, Message> {
    container(text::caption(label).center())
        .width(Length::FillPortion(1))
        .center_x(Length::FillPortion(1))
        .into()
}
