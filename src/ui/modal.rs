use iced::widget::{button, center, column, container, mouse_area, opaque, stack, text};
use iced::{Alignment, Color, Element};

use crate::{Message, Notice};

/// Lay `content` over `base` as a blocking modal with a dimmed backdrop.
/// Clicking the backdrop emits `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// Blocking message card used for validation failures and storage errors
pub fn notice_card(notice: &Notice) -> Element<Message> {
    container(
        column![
            text(&notice.title).size(20),
            text(&notice.body),
            button("OK").on_press(Message::DismissNotice).padding(10),
        ]
        .spacing(15)
        .align_x(Alignment::Center),
    )
    .width(360)
    .padding(20)
    .style(container::rounded_box)
    .into()
}
