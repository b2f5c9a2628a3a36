/// UI module
///
/// View builders for the application:
/// - The main recipe form with its grid (recipes.rs)
/// - The modal recipe type dialog (recipe_types.rs)
/// - The modal overlay helper and notice card (modal.rs)

pub mod modal;
pub mod recipe_types;
pub mod recipes;
