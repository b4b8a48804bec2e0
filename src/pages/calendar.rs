use chrono::{Duration, NaiveDate};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text};
use cosmic::Element;

use cadence::core::calendar::{self, CalendarView, WeekStart};
use cadence::core::event::DisplayEvent;
use cadence::core::task::Task;

use crate::components::event_row::event_row;
use crate::components::month_calendar::month_calendar;
use crate::fl;
use crate::message::Message;

pub fn calendar_view<'a>(
    view: CalendarView,
    reference: NaiveDate,
    selected_day: Option<NaiveDate>,
    week_start: WeekStart,
    tasks: &'a [Task],
    timeline: &'a [Task],
    loading: bool,
) -> Element<'a, Message> {
    let today = chrono::Local::now().date_naive();
    let events: Vec<DisplayEvent> = tasks.iter().map(DisplayEvent::from_task).collect();

    let mut content = column().spacing(16);

    content = content.push(toolbar(view, reference, week_start, loading));
    content = content.push(quick_actions());

    content = match view {
        CalendarView::Month => {
            content.push(month_calendar(reference, selected_day, week_start, today, &events))
        }
        CalendarView::Week => week_view(content, reference, week_start, today, &events),
        CalendarView::Day => day_view(content, reference, today, &events),
    };

    content = content.push(today_summary(&events, today));

    // Backend-generated timeline for the selected (or current) day.
    let plan_date = selected_day.unwrap_or(reference);
    let mut plan_section = column().spacing(4).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title4(fl!("calendar-plan-heading")).width(Length::Fill))
            .push(button::suggested(fl!("calendar-plan-day")).on_press(Message::PlanDay)),
    );
    if timeline.is_empty() {
        plan_section = plan_section.push(text::caption(fl!("calendar-plan-empty")));
    } else {
        plan_section = plan_section.push(text::caption(
            plan_date.format("%A, %b %e").to_string(),
        ));
        for task in timeline {
            plan_section = plan_section.push(event_row(&DisplayEvent::from_task(task)));
        }
    }
    content = content.push(plan_section);

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn toolbar<'a>(
    view: CalendarView,
    reference: NaiveDate,
    week_start: WeekStart,
    loading: bool,
) -> Element<'a, Message> {
    let label = match view {
        CalendarView::Month => reference.format("%B %Y").to_string(),
        CalendarView::Week => {
            let (start, end) = calendar::week_bounds(reference, week_start);
            format!("{} – {}", start.format("%b %e"), end.format("%b %e, %Y"))
        }
        CalendarView::Day => reference.format("%A, %B %e, %Y").to_string(),
    };

    let mut bar = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            button::icon(cosmic::widget::icon::from_name("go-previous-symbolic"))
                .on_press(Message::CalendarPrev),
        )
        .push(text::title4(label).width(Length::Fill).center())
        .push(
            button::icon(cosmic::widget::icon::from_name("go-next-symbolic"))
                .on_press(Message::CalendarNext),
        )
        .push(button::standard(fl!("calendar-today")).on_press(Message::CalendarToday));

    for candidate in CalendarView::ALL {
        let btn = if view == *candidate {
            button::suggested(candidate.label())
        } else {
            button::standard(candidate.label())
        };
        bar = bar.push(btn.on_press(Message::SetCalendarView(*candidate)));
    }

    if loading {
        bar = bar.push(text::caption(fl!("calendar-loading")));
    }

    bar.into()
}

fn quick_actions<'a>() -> Element<'a, Message> {
    row()
        .spacing(8)
        .push(button::suggested(fl!("calendar-new-task")).on_press(Message::NewTask))
        .push(button::standard(fl!("calendar-new-all-day")).on_press(Message::NewAllDayTask))
        .into()
}

fn week_view<'a>(
    mut content: cosmic::widget::column::Column<'a, Message>,
    reference: NaiveDate,
    week_start: WeekStart,
    today: NaiveDate,
    events: &[DisplayEvent],
) -> cosmic::widget::column::Column<'a, Message> {
    let (start, _) = calendar::week_bounds(reference, week_start);
    for offset in 0..7 {
        let date = start + Duration::days(offset);
        content = content.push(day_section(date, today, events));
    }
    content
}

fn day_view<'a>(
    content: cosmic::widget::column::Column<'a, Message>,
    reference: NaiveDate,
    today: NaiveDate,
    events: &[DisplayEvent],
) -> cosmic::widget::column::Column<'a, Message> {
    content.push(day_section(reference, today, events))
}

/// One day's header and its event rows, all-day blocks first.
fn day_section<'a>(
    date: NaiveDate,
    today: NaiveDate,
    events: &[DisplayEvent],
) -> Element<'a, Message> {
    let mut day_events: Vec<&DisplayEvent> =
        events.iter().filter(|e| e.start.date() == date).collect();
    day_events.sort_by_key(|e| (!e.all_day, e.start));

    let header = if date == today {
        format!("{}, {}", fl!("calendar-today"), date.format("%A %b %e"))
    } else {
        date.format("%A, %b %e").to_string()
    };

    let mut section = column().spacing(4);
    section = section.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title4(header).width(Length::Fill))
            .push(
                button::icon(cosmic::widget::icon::from_name("list-add-symbolic")).on_press(
                    Message::OpenSlotDraft(
                        date.and_hms_opt(9, 0, 0).unwrap(),
                        date.and_hms_opt(10, 0, 0).unwrap(),
                    ),
                ),
            ),
    );

    if day_events.is_empty() {
        section = section.push(text::caption(fl!("calendar-day-empty")));
    } else {
        for event in &day_events {
            section = section.push(event_row(event));
        }
    }

    section.into()
}

/// Totals for today, matching what the sidebar summary always showed:
/// scheduled, completed, still ahead of now.
fn today_summary<'a>(events: &[DisplayEvent], today: NaiveDate) -> Element<'a, Message> {
    let now = chrono::Local::now().naive_local();
    let total = events.iter().filter(|e| e.start.date() == today).count();
    let completed = events
        .iter()
        .filter(|e| e.start.date() == today && e.resource.completed)
        .count();
    let upcoming = events
        .iter()
        .filter(|e| e.start.date() == today && e.start > now)
        .count();

    column()
        .spacing(4)
        .push(text::title4(fl!("calendar-summary-heading")))
        .push(
            row()
                .spacing(16)
                .push(text::body(format!("{}: {}", fl!("calendar-summary-total"), total)))
                .push(text::body(format!(
                    "{}: {}",
                    fl!("calendar-summary-completed"),
                    completed
                )))
                .push(text::body(format!(
                    "{}: {}",
                    fl!("calendar-summary-upcoming"),
                    upcoming
                ))),
        )
        .into()
}
