use iced::widget::{
    button, column, container, horizontal_rule, image as picture, mouse_area, pick_list, row,
    scrollable, text, text_input, Column,
};
use iced::{Alignment, Element, Length};

use crate::state::data::RecipeWithType;
use crate::{CookBook, Message};

/// Width reserved for the Edit/Delete action buttons in each grid row
const ACTION_COLUMN_WIDTH: f32 = 150.0;

/// Build the main recipe form: inputs on the left, the recipe grid on
/// the right, a status line at the bottom.
pub fn view(app: &CookBook) -> Element<Message> {
    let content = column![
        text("CookBook").size(32),
        row![inputs(app), grid(app)].spacing(30).height(Length::Fill),
        text(&app.status).size(14),
    ]
    .spacing(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .into()
}

/// The input side of the form: name, description, type selector, photo
fn inputs(app: &CookBook) -> Element<Message> {
    let idle = !app.pending;
    let form = &app.form;

    let submit_label = if form.editing.is_some() {
        "Save Changes"
    } else {
        "Add Recipe"
    };

    column![
        text_input("Name", &form.name)
            .on_input(Message::NameChanged)
            .padding(8),
        text_input("Description", &form.description)
            .on_input(Message::DescriptionChanged)
            .padding(8),
        row![
            pick_list(
                app.types.as_slice(),
                form.selected_type.clone(),
                Message::TypeSelected,
            )
            .placeholder("Recipe type")
            .width(Length::Fill),
            button("New Type…").on_press_maybe(idle.then_some(Message::OpenTypeEditor)),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
        mouse_area(picture(app.preview.clone()).width(200).height(200))
            .on_press(Message::PickImage),
        text(if form.has_user_image() {
            "Photo selected. Click to change it."
        } else {
            "Click the photo to choose an image (PNG or JPG)"
        })
        .size(12),
        row![
            button(submit_label)
                .on_press_maybe(idle.then_some(Message::SubmitRecipe))
                .padding(10),
            button("Clear Fields")
                .on_press_maybe(idle.then_some(Message::ClearFields))
                .padding(10),
        ]
        .spacing(10),
    ]
    .spacing(15)
    .width(320)
    .into()
}

/// The recipe grid: header row plus one row per recipe, newest first
fn grid(app: &CookBook) -> Element<Message> {
    let header = row![
        text("Name").width(Length::FillPortion(2)),
        text("Description").width(Length::FillPortion(3)),
        text("Type").width(Length::FillPortion(2)),
        text("").width(ACTION_COLUMN_WIDTH),
    ]
    .spacing(8);

    let mut rows = Column::new().spacing(6);
    for recipe in &app.recipes {
        rows = rows.push(grid_row(recipe, !app.pending));
    }

    column![header, horizontal_rule(1), scrollable(rows).height(Length::Fill)]
        .spacing(8)
        .width(Length::Fill)
        .into()
}

fn grid_row(recipe: &RecipeWithType, idle: bool) -> Element<Message> {
    row![
        text(&recipe.name).width(Length::FillPortion(2)),
        text(&recipe.description).width(Length::FillPortion(3)),
        text(&recipe.type_name).width(Length::FillPortion(2)),
        row![
            button(text("Edit").size(12))
                .on_press_maybe(idle.then_some(Message::EditRecipe(recipe.id))),
            button(text("Delete").size(12))
                .on_press_maybe(idle.then_some(Message::DeleteRecipe(recipe.id))),
        ]
        .spacing(6)
        .width(ACTION_COLUMN_WIDTH),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
