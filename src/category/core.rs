//! The category domain model and its database operations.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Database identifier for a category.
pub type CategoryId = i64;

/// An expense category owned by a user.
///
/// `budget` is derived, never persisted: the category listing fills it in
/// with the current month's budget amount when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The id for the category. Ignored on create.
    #[serde(default)]
    pub id: CategoryId,
    /// The display name.
    pub name: String,
    /// The display colour as a hex code, e.g. "#ff8800".
    #[serde(default)]
    pub color_code: Option<String>,
    /// An icon index chosen by the client.
    #[serde(default)]
    pub category_icon: Option<i64>,
    /// The ID of the owning user.
    pub userid: String,
    /// The current month's budget amount, when one exists.
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Create the categories table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_categories_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            color_code TEXT,
            category_icon INTEGER,
            userid TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Insert a category and return it with its generated ID.
pub fn insert_category(category: &Category, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO categories (name, color_code, category_icon, userid)
        VALUES (?1, ?2, ?3, ?4)",
        params![
            category.name,
            category.color_code,
            category.category_icon,
            category.userid
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        budget: None,
        ..category.clone()
    })
}

/// Retrieve all categories belonging to `userid`, without budget amounts.
pub fn get_categories_by_user(userid: &str, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, color_code, category_icon, userid
            FROM categories WHERE userid = :userid",
        )?
        .query_map(&[(":userid", &userid)], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the stored fields of a category by its ID.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist.
pub fn update_category(category: &Category, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE categories SET name = ?1, color_code = ?2, category_icon = ?3, userid = ?4
        WHERE id = ?5",
        params![
            category.name,
            category.color_code,
            category.category_icon,
            category.userid,
            category.id
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist, or
/// [Error::ForeignKeyViolation] if budgets or expenses still reference it.
pub fn delete_category(id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM categories WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color_code: row.get(2)?,
        category_icon: row.get(3)?,
        userid: row.get(4)?,
        budget: None,
    })
}

#[cfg(test)]
pub(crate) fn test_category(userid: &str, name: &str) -> Category {
    Category {
        id: 0,
        name: name.to_owned(),
        color_code: Some("#ff8800".to_owned()),
        category_icon: Some(3),
        userid: userid.to_owned(),
        budget: None,
    }
}
