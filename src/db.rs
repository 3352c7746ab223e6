//! Database initialization for the application's SQLite schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, budget::create_budgets_table, category::create_categories_table,
    expense::create_expenses_table, expense_tag::create_expense_tags_table,
    user::create_users_table,
};

/// Create the application's tables and indexes if they do not exist, and
/// turn on foreign key enforcement for the connection.
///
/// # Errors
/// Returns an error if any of the SQL statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Foreign keys cannot be switched on mid-transaction, so set the pragma
    // before creating the tables.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_users_table(&transaction)?;
    create_categories_table(&transaction)?;
    create_budgets_table(&transaction)?;
    create_expenses_table(&transaction)?;
    create_expense_tags_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
