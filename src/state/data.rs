/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

/// A named category a recipe belongs to (e.g., "Dinner")
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeType {
    /// Unique database ID
    pub id: i64,
    /// Display name, unique across all types
    pub name: String,
}

// pick_list labels its options through Display
impl std::fmt::Display for RecipeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Transient DTO carrying the fields of a single add or update call
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    /// Normalized PNG blob, None when the recipe has no photo
    pub image: Option<Vec<u8>>,
    pub recipe_type_id: i64,
}

/// Read model for one grid row: recipe fields plus the denormalized type name.
/// Rebuilt wholesale on every refresh, no identity beyond `id`.
#[derive(Clone, PartialEq)]
pub struct RecipeWithType {
    /// Unique database ID
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<Vec<u8>>,
    pub recipe_type_id: i64,
    /// Name of the referenced recipe type
    pub type_name: String,
}

// Manual Debug: dumping a whole image blob into logs is useless
impl std::fmt::Debug for RecipeWithType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeWithType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("image_bytes", &self.image.as_ref().map(|i| i.len()))
            .field("recipe_type_id", &self.recipe_type_id)
            .field("type_name", &self.type_name)
            .finish()
    }
}
