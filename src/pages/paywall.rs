use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::Element;

use cadence::core::session::{Session, SubscriptionPlan};

use crate::fl;
use crate::message::Message;

pub fn paywall_view<'a>(
    session: &'a Session,
    selected_plan: SubscriptionPlan,
    paying: bool,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    content = content.push(text::title4(format!(
        "Your trial has ended, {}!",
        session.user.name
    )));
    content = content.push(text::body(fl!("paywall-pitch")));

    let mut plans = row().spacing(12);
    for plan in SubscriptionPlan::ALL {
        plans = plans.push(plan_card(*plan, selected_plan == *plan));
    }
    content = content.push(plans);

    let label = if paying {
        fl!("paywall-processing")
    } else {
        format!("Subscribe to {} plan", selected_plan.label())
    };
    let mut subscribe = button::suggested(label);
    if !paying {
        subscribe = subscribe.on_press(Message::Subscribe);
    }
    content = content.push(subscribe);

    content = content.push(text::caption(fl!("paywall-fine-print")));

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(icon::from_name("system-log-out-symbolic").size(16).icon())
            .push(button::standard(fl!("paywall-logout")).on_press(Message::Logout)),
    );

    container(scrollable(
        container(content)
            .padding(32)
            .max_width(560.0)
            .width(Length::Fill),
    ))
    .center_x(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn plan_card(plan: SubscriptionPlan, selected: bool) -> Element<'static, Message> {
    let mut card = column()
        .spacing(4)
        .push(text::title4(plan.label()))
        .push(text::body(plan.price_line()));
    if let Some(savings) = plan.savings() {
        card = card.push(text::caption(savings));
    }

    let btn = if selected {
        button::custom(card).class(cosmic::theme::Button::Suggested)
    } else {
        button::custom(card).class(cosmic::theme::Button::Standard)
    };
    btn.on_press(Message::SelectPlan(plan))
        .width(Length::FillPortion(1))
        .into()
}
