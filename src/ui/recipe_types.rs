use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::Element;

use crate::{CookBook, Message};

/// Content of the modal recipe type dialog: the existing types plus an
/// input for creating a new one.
pub fn view(app: &CookBook) -> Element<Message> {
    let idle = !app.pending;

    let mut type_list = Column::new().spacing(4);
    if app.types.is_empty() {
        type_list = type_list.push(text("No recipe types yet.").size(14));
    }
    for recipe_type in &app.types {
        type_list = type_list.push(text(&recipe_type.name));
    }

    container(
        column![
            text("Recipe Types").size(24),
            scrollable(type_list).height(160),
            row![
                text_input("New type name", &app.type_name)
                    .on_input(Message::TypeNameChanged)
                    .on_submit(Message::SubmitType)
                    .padding(8),
                button("Add").on_press_maybe(idle.then_some(Message::SubmitType)),
            ]
            .spacing(10),
            button("Close").on_press(Message::CloseTypeEditor),
        ]
        .spacing(15),
    )
    .width(340)
    .padding(20)
    .style(container::rounded_box)
    .into()
}
