use iced::widget::image::Handle;
use iced::{Element, Task, Theme};
use rfd::FileDialog;

mod imaging;
mod state;
mod ui;

use state::catalog::{self, Catalog};
use state::data::{NewRecipe, RecipeType, RecipeWithType};
use state::form::RecipeForm;

/// A blocking message shown over the form until dismissed
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    fn storage_error(message: String) -> Self {
        Notice {
            title: "Storage error".to_string(),
            body: message,
        }
    }

    fn invalid_form(violations: Vec<String>) -> Self {
        Notice {
            title: "Form not valid!".to_string(),
            body: violations.join("\n\n"),
        }
    }
}

/// Main application state
pub struct CookBook {
    /// The recipe database
    catalog: Catalog,
    /// Options bound to the type selector
    pub types: Vec<RecipeType>,
    /// Rows bound to the grid, replaced wholesale on every refresh
    pub recipes: Vec<RecipeWithType>,
    /// Transient input state of the recipe form
    pub form: RecipeForm,
    /// Photo currently shown in the preview box
    pub preview: Handle,
    /// Default preview when a recipe has no photo
    placeholder: Handle,
    /// True while a catalog task is in flight; submit/edit/delete
    /// controls are disabled so a double click cannot run twice
    pub pending: bool,
    /// Whether the modal recipe type dialog is open
    pub type_editor_open: bool,
    /// Input value inside the type dialog
    pub type_name: String,
    /// Blocking message, if any
    pub notice: Option<Notice>,
    /// Status message to display to the user
    pub status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Type selector fetch completed
    TypesLoaded(Result<Vec<RecipeType>, String>),
    /// Grid fetch completed
    RecipesLoaded(Result<Vec<RecipeWithType>, String>),
    NameChanged(String),
    DescriptionChanged(String),
    TypeSelected(RecipeType),
    /// User clicked the photo preview
    PickImage,
    /// User clicked Add Recipe / Save Changes
    SubmitRecipe,
    /// Background save completed
    RecipeSaved(Result<(), String>),
    /// User clicked Edit on a grid row
    EditRecipe(i64),
    /// User clicked Delete on a grid row
    DeleteRecipe(i64),
    /// Background delete completed
    RecipeDeleted(Result<(), String>),
    ClearFields,
    OpenTypeEditor,
    CloseTypeEditor,
    TypeNameChanged(String),
    /// User clicked Add inside the type dialog
    SubmitType,
    /// Background type save completed
    TypeSaved(Result<(), String>),
    DismissNotice,
}

impl CookBook {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Initialize the database
        // If this fails, we panic because the app cannot function without its database
        let catalog = Catalog::new()
            .expect("Failed to initialize database. Check permissions and disk space.");

        let recipe_count = catalog.recipe_count().unwrap_or(0);
        println!("🍲 CookBook initialized with {} recipes", recipe_count);

        let placeholder = imaging::load_placeholder();
        let db_path = catalog.path().clone();

        let app = CookBook {
            catalog,
            types: Vec::new(),
            recipes: Vec::new(),
            form: RecipeForm::default(),
            preview: placeholder.clone(),
            placeholder,
            pending: true,
            type_editor_open: false,
            type_name: String::new(),
            notice: None,
            status: format!("Loading {} recipes...", recipe_count),
        };

        let load = Task::batch([
            Task::perform(
                catalog::fetch_recipe_types(db_path.clone()),
                Message::TypesLoaded,
            ),
            Task::perform(catalog::fetch_recipes(db_path), Message::RecipesLoaded),
        ]);

        (app, load)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TypesLoaded(Ok(types)) => {
                self.types = types;
                self.pending = false;

                // The selector auto-selects the first entry; a stale
                // selection is dropped when its type disappeared
                if let Some(selected) = &self.form.selected_type {
                    if !self.types.contains(selected) {
                        self.form.selected_type = None;
                    }
                }
                if self.form.selected_type.is_none() {
                    self.form.selected_type = self.types.first().cloned();
                }

                Task::none()
            }
            Message::TypesLoaded(Err(e)) | Message::RecipesLoaded(Err(e)) => {
                self.pending = false;
                self.notice = Some(Notice::storage_error(e));
                Task::none()
            }
            Message::RecipesLoaded(Ok(recipes)) => {
                self.recipes = recipes;
                self.pending = false;
                self.status = format!("Ready. {} recipes in collection.", self.recipes.len());
                Task::none()
            }
            Message::NameChanged(name) => {
                self.form.name = name;
                Task::none()
            }
            Message::DescriptionChanged(description) => {
                self.form.description = description;
                Task::none()
            }
            Message::TypeSelected(recipe_type) => {
                self.form.selected_type = Some(recipe_type);
                Task::none()
            }
            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Please select an image")
                    .add_filter("Images", &imaging::IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.preview = Handle::from_path(&path);
                    self.form.image_source = Some(path);
                }

                Task::none()
            }
            Message::SubmitRecipe => self.submit_recipe(),
            Message::RecipeSaved(Ok(())) => {
                self.status = if self.form.editing.is_some() {
                    "Recipe updated.".to_string()
                } else {
                    "Recipe added.".to_string()
                };
                self.clear_fields();
                self.refresh_recipes()
            }
            Message::RecipeSaved(Err(e)) => {
                // Keep the fields so the user can retry
                self.pending = false;
                self.notice = Some(Notice::storage_error(e));
                Task::none()
            }
            Message::EditRecipe(id) => {
                if let Some(recipe) = self.recipes.iter().find(|r| r.id == id) {
                    self.form.fill_for_edit(recipe, &self.types);
                    self.preview = match &recipe.image {
                        Some(blob) => imaging::from_db_image(blob),
                        None => self.placeholder.clone(),
                    };
                    self.status = format!("Editing \"{}\".", recipe.name);
                }
                Task::none()
            }
            Message::DeleteRecipe(id) => {
                // Deleting the row currently loaded for editing would
                // leave a dead edit target behind
                if self.form.editing == Some(id) {
                    self.clear_fields();
                }
                self.pending = true;
                self.status = "Deleting recipe...".to_string();
                Task::perform(
                    catalog::remove_recipe(self.catalog.path().clone(), id),
                    Message::RecipeDeleted,
                )
            }
            Message::RecipeDeleted(Ok(())) => {
                self.status = "Recipe deleted.".to_string();
                self.refresh_recipes()
            }
            Message::RecipeDeleted(Err(e)) => {
                self.pending = false;
                self.notice = Some(Notice::storage_error(e));
                Task::none()
            }
            Message::ClearFields => {
                self.clear_fields();
                Task::none()
            }
            Message::OpenTypeEditor => {
                self.type_editor_open = true;
                Task::none()
            }
            Message::CloseTypeEditor => {
                // Refresh the selector so newly added types appear
                self.type_editor_open = false;
                self.type_name.clear();
                self.refresh_types()
            }
            Message::TypeNameChanged(name) => {
                self.type_name = name;
                Task::none()
            }
            Message::SubmitType => {
                if self.type_name.trim().is_empty() {
                    self.notice = Some(Notice::invalid_form(vec![
                        "Please enter type name.".to_string(),
                    ]));
                    return Task::none();
                }

                self.pending = true;
                Task::perform(
                    catalog::save_recipe_type(
                        self.catalog.path().clone(),
                        self.type_name.trim().to_string(),
                    ),
                    Message::TypeSaved,
                )
            }
            Message::TypeSaved(Ok(())) => {
                self.type_name.clear();
                self.status = "Recipe type added.".to_string();
                self.refresh_types()
            }
            Message::TypeSaved(Err(e)) => {
                self.pending = false;
                self.notice = Some(Notice::storage_error(e));
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Validate the form and launch the save task.
    /// On violations a blocking message lists every failed rule and
    /// nothing is submitted.
    fn submit_recipe(&mut self) -> Task<Message> {
        let violations = self.form.violations();
        if !violations.is_empty() {
            self.notice = Some(Notice::invalid_form(violations));
            return Task::none();
        }

        // violations() guarantees a selection exists
        let Some(selected) = self.form.selected_type.clone() else {
            return Task::none();
        };

        self.pending = true;
        self.status = if self.form.editing.is_some() {
            "Saving changes...".to_string()
        } else {
            "Adding recipe...".to_string()
        };

        let db_path = self.catalog.path().clone();
        let editing = self.form.editing;
        let image_source = self.form.image_source.clone();
        let existing_image = self.form.existing_image.clone();
        let recipe = self.form.to_recipe(None, selected.id);

        Task::perform(
            async move {
                let image = imaging::resolve_db_image(image_source.as_deref(), existing_image)?;
                let recipe = NewRecipe { image, ..recipe };
                catalog::save_recipe(db_path, editing, recipe).await
            },
            Message::RecipeSaved,
        )
    }

    /// Reset every input back to placeholder state, leaving the grid
    /// and type selector alone
    fn clear_fields(&mut self) {
        self.form.clear();
        self.preview = self.placeholder.clone();
    }

    /// Replace the grid contents with a fresh fetch
    fn refresh_recipes(&mut self) -> Task<Message> {
        self.pending = true;
        Task::perform(
            catalog::fetch_recipes(self.catalog.path().clone()),
            Message::RecipesLoaded,
        )
    }

    /// Replace the type selector contents with a fresh fetch
    fn refresh_types(&mut self) -> Task<Message> {
        self.pending = true;
        Task::perform(
            catalog::fetch_recipe_types(self.catalog.path().clone()),
            Message::TypesLoaded,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let base = ui::recipes::view(self);

        let content: Element<Message> = if self.type_editor_open {
            ui::modal::modal(base, ui::recipe_types::view(self), Message::CloseTypeEditor)
        } else {
            base
        };

        match &self.notice {
            Some(notice) => ui::modal::modal(
                content,
                ui::modal::notice_card(notice),
                Message::DismissNotice,
            ),
            None => content,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("CookBook", CookBook::update, CookBook::view)
        .theme(CookBook::theme)
        .centered()
        .run_with(CookBook::new)
}
