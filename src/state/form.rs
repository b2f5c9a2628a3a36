//! Transient input state for the recipe form
//!
//! Holds the in-progress field values between UI events, the pending
//! image selection, and the edit target when a grid row was loaded
//! back into the inputs.

use std::path::PathBuf;

use super::data::{NewRecipe, RecipeType, RecipeWithType};

#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    /// File the user explicitly picked this session, not yet converted
    pub image_source: Option<PathBuf>,
    /// Blob carried over from the row loaded for editing, kept when the
    /// user does not pick a replacement photo
    pub existing_image: Option<Vec<u8>>,
    /// ID of the recipe being edited, None while composing a new one
    pub editing: Option<i64>,
    pub selected_type: Option<RecipeType>,
}

impl RecipeForm {
    /// Whether the user explicitly picked an image file this session
    pub fn has_user_image(&self) -> bool {
        self.image_source.is_some()
    }

    /// Collect all validation failures for the current field values.
    /// An empty vector means the form may be submitted.
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push("Please enter name.".to_string());
        }
        if self.description.trim().is_empty() {
            violations.push("Please enter description.".to_string());
        }
        if self.selected_type.is_none() {
            violations.push("Please select a recipe type.".to_string());
        }

        violations
    }

    /// Build the DTO for submission. The image blob must already be
    /// converted; `violations` must have come back empty.
    pub fn to_recipe(&self, image: Option<Vec<u8>>, recipe_type_id: i64) -> NewRecipe {
        NewRecipe {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image,
            recipe_type_id,
        }
    }

    /// Load a grid row back into the inputs for editing
    pub fn fill_for_edit(&mut self, recipe: &RecipeWithType, types: &[RecipeType]) {
        self.name = recipe.name.clone();
        self.description = recipe.description.clone();
        self.image_source = None;
        self.existing_image = recipe.image.clone();
        self.editing = Some(recipe.id);
        self.selected_type = types
            .iter()
            .find(|t| t.id == recipe.recipe_type_id)
            .cloned();
    }

    /// Reset every input back to placeholder state.
    /// The type selection is left alone, matching the grid and selector
    /// which a clear does not touch.
    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
        self.image_source = None;
        self.existing_image = None;
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dinner() -> RecipeType {
        RecipeType {
            id: 7,
            name: "Dinner".into(),
        }
    }

    fn valid_form() -> RecipeForm {
        RecipeForm {
            name: "Soup".into(),
            description: "Hot soup".into(),
            selected_type: Some(dinner()),
            ..RecipeForm::default()
        }
    }

    #[test]
    fn valid_form_has_no_violations() {
        assert!(valid_form().violations().is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut form = valid_form();
        form.name = "   ".into();

        let violations = form.violations();
        assert_eq!(violations, vec!["Please enter name.".to_string()]);
    }

    #[test]
    fn all_violations_are_listed_together() {
        let form = RecipeForm::default();

        let violations = form.violations();
        assert_eq!(violations.len(), 3);
        assert!(violations[0].contains("name"));
        assert!(violations[1].contains("description"));
        assert!(violations[2].contains("recipe type"));
    }

    #[test]
    fn fill_for_edit_carries_row_fields_and_type() {
        let types = vec![
            RecipeType {
                id: 1,
                name: "Breakfast".into(),
            },
            dinner(),
        ];
        let row = RecipeWithType {
            id: 42,
            name: "Soup".into(),
            description: "Hot soup".into(),
            image: Some(vec![1, 2, 3]),
            recipe_type_id: 7,
            type_name: "Dinner".into(),
        };

        let mut form = RecipeForm::default();
        form.fill_for_edit(&row, &types);

        assert_eq!(form.name, "Soup");
        assert_eq!(form.description, "Hot soup");
        assert_eq!(form.existing_image, Some(vec![1, 2, 3]));
        assert_eq!(form.editing, Some(42));
        assert_eq!(form.selected_type, Some(dinner()));
        assert!(!form.has_user_image());
    }

    #[test]
    fn fill_for_edit_with_unknown_type_leaves_selection_empty() {
        let row = RecipeWithType {
            id: 1,
            name: "Soup".into(),
            description: "Hot soup".into(),
            image: None,
            recipe_type_id: 99,
            type_name: "Gone".into(),
        };

        let mut form = RecipeForm::default();
        form.fill_for_edit(&row, &[dinner()]);

        assert!(form.selected_type.is_none());
    }

    #[test]
    fn clear_resets_fields_but_keeps_type_selection() {
        let mut form = valid_form();
        form.image_source = Some(PathBuf::from("/tmp/photo.png"));
        form.existing_image = Some(vec![5]);
        form.editing = Some(3);

        form.clear();

        assert!(form.name.is_empty());
        assert!(form.description.is_empty());
        assert!(form.image_source.is_none());
        assert!(form.existing_image.is_none());
        assert!(form.editing.is_none());
        assert_eq!(form.selected_type, Some(dinner()));
    }

    #[test]
    fn to_recipe_trims_fields() {
        let mut form = valid_form();
        form.name = "  Soup ".into();

        let recipe = form.to_recipe(None, 7);
        assert_eq!(recipe.name, "Soup");
        assert_eq!(recipe.recipe_type_id, 7);
        assert!(recipe.image.is_none());
    }
}
