//! The monthly budget domain model and its database operations.
//!
//! A budget row is unique per (userid, category, month label); the database
//! index `idx_budgets_user_category_month` enforces this, including against
//! concurrent inserts.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{Error, category::CategoryId};

time::serde::format_description!(
    iso_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// Database identifier for a budget.
pub type BudgetId = i64;

/// A spending budget for one category in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The id for the budget. Ignored on create.
    #[serde(default)]
    pub id: BudgetId,
    /// The ID of the owning user.
    pub userid: String,
    /// The category this budget applies to.
    pub category_id: CategoryId,
    /// The month label the budget applies to, e.g. "March 2025".
    pub month: String,
    /// The budgeted amount.
    pub amount: f64,
    /// The currency code, e.g. "NZD".
    #[serde(default)]
    pub currency: Option<String>,
    /// Whether unspent amounts roll over into the next month.
    #[serde(rename = "rollOverEnabled", default)]
    pub rollover_enabled: Option<bool>,
    /// When the row was created. Set by the server on insert.
    #[serde(default, with = "iso_datetime::option")]
    pub created_at: Option<PrimitiveDateTime>,
}

/// Create the budgets table and its unique (user, category, month) index.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_budgets_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budgets (
            id INTEGER PRIMARY KEY,
            userid TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            month TEXT NOT NULL,
            amount REAL NOT NULL,
            currency TEXT,
            rollover_enabled INTEGER,
            created_at TEXT,
            FOREIGN KEY(category_id) REFERENCES categories(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_budgets_user_category_month
            ON budgets(userid, category_id, month);",
    )?;

    Ok(())
}

/// Insert a budget and return it with its generated ID and creation time.
///
/// # Errors
/// Returns [Error::DuplicateBudget] if a budget already exists for the same
/// (userid, category, month), or [Error::ForeignKeyViolation] if
/// `category_id` does not refer to a category.
pub fn insert_budget(
    budget: &Budget,
    created_at: PrimitiveDateTime,
    connection: &Connection,
) -> Result<Budget, Error> {
    connection.execute(
        "INSERT INTO budgets (userid, category_id, month, amount, currency, rollover_enabled, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            budget.userid,
            budget.category_id,
            budget.month,
            budget.amount,
            budget.currency,
            budget.rollover_enabled,
            created_at,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Budget {
        id,
        created_at: Some(created_at),
        ..budget.clone()
    })
}

/// Overwrite the stored fields of a budget by its ID.
///
/// # Errors
/// Returns [Error::NotFound] if the budget does not exist, or
/// [Error::DuplicateBudget] if the update would collide with another
/// budget's (userid, category, month) key.
pub fn update_budget(budget: &Budget, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE budgets SET userid = ?1, category_id = ?2, month = ?3, amount = ?4,
            currency = ?5, rollover_enabled = ?6
        WHERE id = ?7",
        params![
            budget.userid,
            budget.category_id,
            budget.month,
            budget.amount,
            budget.currency,
            budget.rollover_enabled,
            budget.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Retrieve all budgets belonging to `userid` for the month `month`.
pub fn get_budgets_for_month(
    userid: &str,
    month: &str,
    connection: &Connection,
) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, userid, category_id, month, amount, currency, rollover_enabled, created_at
            FROM budgets WHERE userid = :userid AND month = :month",
        )?
        .query_map(&[(":userid", &userid), (":month", &month)], map_row_to_budget)?
        .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
        .collect()
}

/// Look up the budget amount for (`category_id`, `userid`, `month`).
///
/// Returns `None` when no budget is defined for that category and month.
pub fn get_budget_amount(
    category_id: CategoryId,
    userid: &str,
    month: &str,
    connection: &Connection,
) -> Result<Option<f64>, Error> {
    let result = connection.query_row(
        "SELECT amount FROM budgets
        WHERE category_id = ?1 AND userid = ?2 AND month = ?3",
        params![category_id, userid, month],
        |row| row.get(0),
    );

    match result {
        Ok(amount) => Ok(Some(amount)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn map_row_to_budget(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        userid: row.get(1)?,
        category_id: row.get(2)?,
        month: row.get(3)?,
        amount: row.get(4)?,
        currency: row.get(5)?,
        rollover_enabled: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
pub(crate) fn test_budget(userid: &str, category_id: CategoryId, month: &str) -> Budget {
    Budget {
        id: 0,
        userid: userid.to_owned(),
        category_id,
        month: month.to_owned(),
        amount: 250.0,
        currency: Some("NZD".to_owned()),
        rollover_enabled: Some(false),
        created_at: None,
    }
}
