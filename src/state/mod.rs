/// State management module
///
/// This module handles all application state, including:
/// - Database access and background fetch/mutate tasks (catalog.rs)
/// - Shared data structures (data.rs)
/// - Transient recipe form input state and validation (form.rs)

pub mod catalog;
pub mod data;
pub mod form;
