use chrono::Utc;
use rusqlite::{Connection, Result as SqlResult};
use std::path::PathBuf;
use thiserror::Error;

use super::data::{NewRecipe, RecipeType, RecipeWithType};

/// Errors raised by the catalog layer
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

/// The Catalog manages the SQLite database holding recipes and recipe types.
pub struct Catalog {
    conn: Connection,
    db_path: PathBuf,
}

impl Catalog {
    /// Create a new Catalog instance and initialize the database.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/cookbook/cookbook.db
    /// - macOS: ~/Library/Application Support/cookbook/cookbook.db
    /// - Windows: %APPDATA%\cookbook\cookbook.db
    pub fn new() -> Result<Self, CatalogError> {
        let db_path = Self::default_db_path();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Open or create the database
        let conn = Connection::open(&db_path)?;

        println!("📁 Database initialized at: {}", db_path.display());

        init_schema(&conn)?;
        println!("✅ Database schema initialized");

        Ok(Catalog { conn, db_path })
    }

    /// Get the path where the database should be stored
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("cookbook");
        path.push("cookbook.db");
        path
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of recipes in the catalog
    pub fn recipe_count(&self) -> SqlResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("db_path", &self.db_path)
            .finish()
    }
}

// ======================================================================
// Schema and queries
//
// Free functions over a Connection so the UI-thread catalog, background
// task connections, and tests all share one implementation.
// ======================================================================

/// Initialize the database schema.
/// Creates all necessary tables and indexes if they don't exist.
fn init_schema(conn: &Connection) -> SqlResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipe_types (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    // image is a normalized PNG blob, NULL when the recipe has no photo
    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            description     TEXT NOT NULL,
            image           BLOB,
            recipe_type_id  INTEGER NOT NULL,
            created_at      INTEGER NOT NULL,
            FOREIGN KEY(recipe_type_id) REFERENCES recipe_types(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_recipes_created_at
         ON recipes(created_at DESC)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_recipes_recipe_type_id
         ON recipes(recipe_type_id)",
        [],
    )?;

    Ok(())
}

/// Get all recipe types ordered by name
pub fn list_recipe_types(conn: &Connection) -> SqlResult<Vec<RecipeType>> {
    let mut stmt = conn.prepare("SELECT id, name FROM recipe_types ORDER BY name")?;

    let type_iter = stmt.query_map([], |row| {
        Ok(RecipeType {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut types = Vec::new();
    for recipe_type in type_iter {
        types.push(recipe_type?);
    }

    Ok(types)
}

/// Get all recipes joined with their type name, newest first
pub fn list_recipes(conn: &Connection) -> SqlResult<Vec<RecipeWithType>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.name, r.description, r.image, r.recipe_type_id, t.name
         FROM recipes r
         JOIN recipe_types t ON t.id = r.recipe_type_id
         ORDER BY r.created_at DESC, r.id DESC",
    )?;

    let recipe_iter = stmt.query_map([], |row| {
        Ok(RecipeWithType {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            image: row.get(3)?,
            recipe_type_id: row.get(4)?,
            type_name: row.get(5)?,
        })
    })?;

    let mut recipes = Vec::new();
    for recipe in recipe_iter {
        recipes.push(recipe?);
    }

    Ok(recipes)
}

/// Insert a new recipe, returns the new ID
pub fn insert_recipe(conn: &Connection, recipe: &NewRecipe) -> SqlResult<i64> {
    conn.execute(
        "INSERT INTO recipes (name, description, image, recipe_type_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            recipe.name,
            recipe.description,
            recipe.image,
            recipe.recipe_type_id,
            Utc::now().timestamp(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Rewrite an existing recipe's fields in place.
/// Updating an id that no longer exists is an error, not a silent no-op.
pub fn update_recipe(conn: &Connection, id: i64, recipe: &NewRecipe) -> SqlResult<()> {
    let updated = conn.execute(
        "UPDATE recipes SET name = ?1, description = ?2, image = ?3, recipe_type_id = ?4
         WHERE id = ?5",
        rusqlite::params![
            recipe.name,
            recipe.description,
            recipe.image,
            recipe.recipe_type_id,
            id,
        ],
    )?;
    if updated == 0 {
        return Err(rusqlite::Error::QueryReturnedNoRows);
    }
    Ok(())
}

/// Delete a recipe by ID, returns the number of rows removed
pub fn delete_recipe(conn: &Connection, id: i64) -> SqlResult<usize> {
    conn.execute("DELETE FROM recipes WHERE id = ?1", rusqlite::params![id])
}

/// Insert a new recipe type, returns the new ID
pub fn insert_recipe_type(conn: &Connection, name: &str) -> SqlResult<i64> {
    conn.execute(
        "INSERT INTO recipe_types (name) VALUES (?1)",
        rusqlite::params![name],
    )?;

    Ok(conn.last_insert_rowid())
}

// ======================================================================
// Background tasks
//
// rusqlite::Connection is not Send, so each task opens its own
// connection by path and runs on the blocking pool. Errors are
// flattened to String because iced messages must be Clone.
// ======================================================================

async fn run_blocking<T, F>(job: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CatalogError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| CatalogError::TaskJoin(e.to_string()).to_string())?
        .map_err(|e| e.to_string())
}

/// Fetch all recipe types
pub async fn fetch_recipe_types(db_path: PathBuf) -> Result<Vec<RecipeType>, String> {
    run_blocking(move || {
        let conn = Connection::open(&db_path)?;
        Ok(list_recipe_types(&conn)?)
    })
    .await
}

/// Fetch all recipes with their type names
pub async fn fetch_recipes(db_path: PathBuf) -> Result<Vec<RecipeWithType>, String> {
    run_blocking(move || {
        let conn = Connection::open(&db_path)?;
        Ok(list_recipes(&conn)?)
    })
    .await
}

/// Persist a recipe: insert when `editing` is None, update in place otherwise
pub async fn save_recipe(
    db_path: PathBuf,
    editing: Option<i64>,
    recipe: NewRecipe,
) -> Result<(), String> {
    run_blocking(move || {
        let conn = Connection::open(&db_path)?;
        match editing {
            Some(id) => update_recipe(&conn, id, &recipe)?,
            None => {
                insert_recipe(&conn, &recipe)?;
            }
        }
        Ok(())
    })
    .await
}

/// Remove a recipe by ID
pub async fn remove_recipe(db_path: PathBuf, id: i64) -> Result<(), String> {
    run_blocking(move || {
        let conn = Connection::open(&db_path)?;
        delete_recipe(&conn, id)?;
        Ok(())
    })
    .await
}

/// Persist a new recipe type
pub async fn save_recipe_type(db_path: PathBuf, name: String) -> Result<(), String> {
    run_blocking(move || {
        let conn = Connection::open(&db_path)?;
        insert_recipe_type(&conn, &name)?;
        Ok(())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory database");
        init_schema(&conn).expect("schema");
        conn
    }

    fn soup(type_id: i64) -> NewRecipe {
        NewRecipe {
            name: "Soup".into(),
            description: "Hot soup".into(),
            image: None,
            recipe_type_id: type_id,
        }
    }

    #[test]
    fn add_then_list_reflects_contents() {
        let conn = test_conn();
        let dinner = insert_recipe_type(&conn, "Dinner").unwrap();

        insert_recipe(&conn, &soup(dinner)).unwrap();

        let recipes = list_recipes(&conn).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Soup");
        assert_eq!(recipes[0].description, "Hot soup");
        assert_eq!(recipes[0].type_name, "Dinner");
        assert!(recipes[0].image.is_none());
    }

    #[test]
    fn stored_image_blob_survives_listing() {
        let conn = test_conn();
        let dinner = insert_recipe_type(&conn, "Dinner").unwrap();

        let blob = vec![1u8, 2, 3, 4];
        let recipe = NewRecipe {
            image: Some(blob.clone()),
            ..soup(dinner)
        };
        insert_recipe(&conn, &recipe).unwrap();

        let recipes = list_recipes(&conn).unwrap();
        assert_eq!(recipes[0].image.as_deref(), Some(blob.as_slice()));
    }

    #[test]
    fn delete_removes_row() {
        let conn = test_conn();
        let dinner = insert_recipe_type(&conn, "Dinner").unwrap();
        let id = insert_recipe(&conn, &soup(dinner)).unwrap();

        assert_eq!(delete_recipe(&conn, id).unwrap(), 1);
        assert!(list_recipes(&conn).unwrap().is_empty());

        // deleting again is a no-op
        assert_eq!(delete_recipe(&conn, id).unwrap(), 0);
    }

    #[test]
    fn update_rewrites_fields_in_place() {
        let conn = test_conn();
        let dinner = insert_recipe_type(&conn, "Dinner").unwrap();
        let lunch = insert_recipe_type(&conn, "Lunch").unwrap();
        let id = insert_recipe(&conn, &soup(dinner)).unwrap();

        let revised = NewRecipe {
            name: "Cold Soup".into(),
            description: "Gazpacho".into(),
            image: Some(vec![9u8; 8]),
            recipe_type_id: lunch,
        };
        update_recipe(&conn, id, &revised).unwrap();

        let recipes = list_recipes(&conn).unwrap();
        assert_eq!(recipes.len(), 1, "update must not create a second row");
        assert_eq!(recipes[0].id, id);
        assert_eq!(recipes[0].name, "Cold Soup");
        assert_eq!(recipes[0].type_name, "Lunch");
        assert_eq!(recipes[0].image.as_deref(), Some(&[9u8; 8][..]));
    }

    #[test]
    fn update_of_deleted_recipe_is_an_error() {
        let conn = test_conn();
        let dinner = insert_recipe_type(&conn, "Dinner").unwrap();
        let id = insert_recipe(&conn, &soup(dinner)).unwrap();
        delete_recipe(&conn, id).unwrap();

        let revised = NewRecipe {
            name: "Cold Soup".into(),
            ..soup(dinner)
        };
        assert!(
            update_recipe(&conn, id, &revised).is_err(),
            "saving an edit of a deleted recipe must not report success"
        );
        assert!(list_recipes(&conn).unwrap().is_empty());
    }

    #[test]
    fn recipe_types_listed_by_name() {
        let conn = test_conn();
        insert_recipe_type(&conn, "Dinner").unwrap();
        insert_recipe_type(&conn, "Breakfast").unwrap();

        let types = list_recipe_types(&conn).unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Breakfast", "Dinner"]);
    }

    #[test]
    fn duplicate_type_name_is_rejected() {
        let conn = test_conn();
        insert_recipe_type(&conn, "Dinner").unwrap();
        assert!(insert_recipe_type(&conn, "Dinner").is_err());
    }
}
