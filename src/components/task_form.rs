use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, flex_row, row, text, text_input};
use cosmic::Element;

use cadence::core::draft::{FormTab, TaskDraft};
use cadence::core::task::{Priority, Repeat, TaskCategory};
use cadence::core::timer::Countdown;

use crate::fl;
use crate::message::Message;

/// The three-tab task editor. Field values live in the draft untouched when
/// tabs switch; only Save validates.
pub fn task_form<'a>(
    draft: &'a TaskDraft,
    active_tab: FormTab,
    countdown: Option<&Countdown>,
) -> cosmic::widget::column::Column<'a, Message> {
    let mut content = column().spacing(16);

    // Tab strip
    let mut tabs = row().spacing(4);
    for tab in FormTab::ALL {
        let btn = if *tab == active_tab {
            button::suggested(tab.label())
        } else {
            button::standard(tab.label())
        };
        tabs = tabs.push(btn.on_press(Message::EditorTabSelected(*tab)));
    }
    content = content.push(tabs);

    content = match active_tab {
        FormTab::Basic => basic_tab(content, draft),
        FormTab::Timing => timing_tab(content, draft, countdown),
        FormTab::Advanced => advanced_tab(content, draft),
    };

    // Save / Cancel / Delete
    let mut actions = row()
        .spacing(8)
        .push(button::suggested(fl!("editor-save")).on_press(Message::DraftSubmit))
        .push(button::standard(fl!("editor-cancel")).on_press(Message::DraftCancel));
    if !draft.is_new() {
        actions = actions.push(button::destructive(fl!("editor-delete")).on_press(Message::DraftDelete));
    }
    content.push(actions)
}

fn basic_tab<'a>(
    mut content: cosmic::widget::column::Column<'a, Message>,
    draft: &'a TaskDraft,
) -> cosmic::widget::column::Column<'a, Message> {
    content = content.push(text::title4(fl!("editor-title")));
    content = content.push(
        text_input::text_input(fl!("editor-title-placeholder"), &draft.title)
            .on_input(Message::DraftTitle)
            .on_submit(|_| Message::DraftSubmit)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("editor-description")));
    content = content.push(
        text_input::text_input(fl!("editor-description-placeholder"), &draft.description)
            .on_input(Message::DraftDescription)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("editor-category")));
    let mut cat_items: Vec<Element<'a, Message>> = Vec::new();
    for cat in TaskCategory::ALL {
        let btn = if draft.category == *cat {
            button::suggested(cat.label())
        } else {
            button::standard(cat.label())
        };
        cat_items.push(btn.on_press(Message::DraftCategory(*cat)).into());
    }
    content = content.push(flex_row(cat_items).row_spacing(4).column_spacing(4));

    content = content.push(text::title4(fl!("editor-priority")));
    let mut priority_row = row().spacing(4);
    for priority in Priority::ALL {
        let btn = if draft.priority == *priority {
            button::suggested(priority.label())
        } else {
            button::standard(priority.label())
        };
        priority_row = priority_row.push(btn.on_press(Message::DraftPriority(*priority)));
    }
    content = content.push(priority_row);

    content = content.push(text::title4(fl!("editor-location")));
    content = content.push(
        text_input::text_input(fl!("editor-location-placeholder"), &draft.location)
            .on_input(Message::DraftLocation)
            .width(Length::Fill),
    );

    content
}

fn timing_tab<'a>(
    mut content: cosmic::widget::column::Column<'a, Message>,
    draft: &'a TaskDraft,
    countdown: Option<&Countdown>,
) -> cosmic::widget::column::Column<'a, Message> {
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("editor-all-day")).width(Length::Fill))
            .push(cosmic::widget::toggler(draft.all_day).on_toggle(Message::DraftAllDay)),
    );

    content = content.push(text::caption(fl!("editor-start")));
    if draft.all_day {
        content = content.push(
            text_input::text_input("YYYY-MM-DD", &draft.start_date)
                .on_input(Message::DraftStartDate)
                .width(Length::Fill),
        );
    } else {
        content = content.push(
            row()
                .spacing(8)
                .push(
                    text_input::text_input("YYYY-MM-DD", &draft.start_date)
                        .on_input(Message::DraftStartDate)
                        .width(Length::Fill),
                )
                .push(
                    text_input::text_input("HH:MM", &draft.start_time)
                        .on_input(Message::DraftStartTime)
                        .width(Length::Fixed(80.0)),
                ),
        );
    }

    content = content.push(text::caption(fl!("editor-end")));
    if draft.all_day {
        content = content.push(
            text_input::text_input("YYYY-MM-DD", &draft.end_date)
                .on_input(Message::DraftEndDate)
                .width(Length::Fill),
        );
    } else {
        content = content.push(
            row()
                .spacing(8)
                .push(
                    text_input::text_input("YYYY-MM-DD", &draft.end_date)
                        .on_input(Message::DraftEndDate)
                        .width(Length::Fill),
                )
                .push(
                    text_input::text_input("HH:MM", &draft.end_time)
                        .on_input(Message::DraftEndTime)
                        .width(Length::Fixed(80.0)),
                ),
        );
    }

    content = content.push(text::caption(fl!("editor-deadline")));
    content = content.push(
        text_input::text_input("YYYY-MM-DD HH:MM", &draft.deadline)
            .on_input(Message::DraftDeadline)
            .width(Length::Fill),
    );

    content = content.push(text::caption(fl!("editor-reminder")));
    content = content.push(
        text_input::text_input("YYYY-MM-DD HH:MM", &draft.reminder)
            .on_input(Message::DraftReminder)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("editor-repeat")));
    let mut repeat_items: Vec<Element<'a, Message>> = Vec::new();
    for repeat in Repeat::ALL {
        let btn = if draft.repeat == *repeat {
            button::suggested(repeat.label())
        } else {
            button::standard(repeat.label())
        };
        repeat_items.push(btn.on_press(Message::DraftRepeat(*repeat)).into());
    }
    content = content.push(flex_row(repeat_items).row_spacing(4).column_spacing(4));

    // Focus countdown: local-only, seeded from the minutes field, never saved.
    content = content.push(text::title4(fl!("editor-timer")));
    let mut timer_row = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            text_input::text_input("25", &draft.timer_minutes)
                .on_input(Message::DraftTimerMinutes)
                .width(Length::Fixed(64.0)),
        )
        .push(text::caption(fl!("editor-timer-minutes")));

    match countdown {
        Some(countdown) if countdown.is_running() => {
            timer_row = timer_row
                .push(text::title4(countdown.display()))
                .push(button::standard(fl!("editor-timer-stop")).on_press(Message::TimerStop));
        }
        _ => {
            let mut start = button::suggested(fl!("editor-timer-start"));
            if !draft.timer_minutes.trim().is_empty() {
                start = start.on_press(Message::TimerStart);
            }
            timer_row = timer_row.push(start);
        }
    }
    content = content.push(timer_row);

    content
}

fn advanced_tab<'a>(
    mut content: cosmic::widget::column::Column<'a, Message>,
    draft: &'a TaskDraft,
) -> cosmic::widget::column::Column<'a, Message> {
    content = content.push(text::title4(fl!("editor-tags")));
    content = content.push(
        text_input::text_input(fl!("editor-tags-placeholder"), &draft.tags)
            .on_input(Message::DraftTags)
            .width(Length::Fill),
    );

    content = content.push(text::title4(fl!("editor-notes")));
    content = content.push(
        text_input::text_input(fl!("editor-notes-placeholder"), &draft.notes)
            .on_input(Message::DraftNotes)
            .width(Length::Fill),
    );

    content
}
