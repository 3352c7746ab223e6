//! The expense-to-tag join table.
//!
//! The schema ships with the rest of the database but no endpoint reads or
//! writes it yet.

use rusqlite::Connection;

/// Create the expense_tags join table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_tags_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense_tags (
            expense_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (expense_id, tag_id)
        )",
        (),
    )?;

    Ok(())
}
