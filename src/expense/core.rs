//! The expense domain model and its table.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{Error, category::CategoryId};

time::serde::format_description!(
    iso_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single spend recorded by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The id for the expense. Ignored on create.
    #[serde(default)]
    pub id: ExpenseId,
    /// The ID of the owning user.
    pub userid: String,
    /// The category the expense belongs to.
    pub category_id: CategoryId,
    /// The amount spent.
    pub amount: f64,
    /// The currency code, e.g. "NZD".
    #[serde(default)]
    pub currency: Option<String>,
    /// When the expense happened.
    #[serde(with = "iso_datetime")]
    pub date: PrimitiveDateTime,
    /// How the expense was paid, e.g. "card".
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the row was created. Set by the server on insert.
    #[serde(default, with = "iso_datetime::option")]
    pub created_at: Option<PrimitiveDateTime>,
    /// When the row was last updated. Set by the server on update.
    #[serde(default, with = "iso_datetime::option")]
    pub updated_at: Option<PrimitiveDateTime>,
    /// Whether the expense recurs every month.
    #[serde(default)]
    pub is_recurring: Option<bool>,
}

/// Create the expenses table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expenses_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY,
            userid TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            currency TEXT,
            date TEXT NOT NULL,
            payment_method TEXT,
            notes TEXT,
            created_at TEXT,
            updated_at TEXT,
            is_recurring INTEGER,
            FOREIGN KEY(category_id) REFERENCES categories(id)
        )",
        (),
    )?;

    Ok(())
}

/// Insert an expense and return it with its generated ID and timestamps.
///
/// # Errors
/// Returns [Error::ForeignKeyViolation] if `category_id` does not refer to a
/// category.
pub fn insert_expense(
    expense: &Expense,
    created_at: PrimitiveDateTime,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses
            (userid, category_id, amount, currency, date, payment_method, notes, created_at, updated_at, is_recurring)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            expense.userid,
            expense.category_id,
            expense.amount,
            expense.currency,
            expense.date,
            expense.payment_method,
            expense.notes,
            created_at,
            created_at,
            expense.is_recurring,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        created_at: Some(created_at),
        updated_at: Some(created_at),
        ..expense.clone()
    })
}

/// Overwrite the stored fields of an expense by its ID, stamping
/// `updated_at`.
///
/// # Errors
/// Returns [Error::NotFound] if the expense does not exist.
pub fn update_expense(
    expense: &Expense,
    updated_at: PrimitiveDateTime,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expenses SET userid = ?1, category_id = ?2, amount = ?3, currency = ?4,
            date = ?5, payment_method = ?6, notes = ?7, updated_at = ?8, is_recurring = ?9
        WHERE id = ?10",
        params![
            expense.userid,
            expense.category_id,
            expense.amount,
            expense.currency,
            expense.date,
            expense.payment_method,
            expense.notes,
            updated_at,
            expense.is_recurring,
            expense.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the expense with ID `id`.
///
/// # Errors
/// Returns [Error::NotFound] if the expense does not exist.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

pub(crate) fn map_row_to_expense(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        userid: row.get(1)?,
        category_id: row.get(2)?,
        amount: row.get(3)?,
        currency: row.get(4)?,
        date: row.get(5)?,
        payment_method: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        is_recurring: row.get(10)?,
    })
}

pub(crate) const EXPENSE_COLUMNS: &str =
    "id, userid, category_id, amount, currency, date, payment_method, notes, created_at, updated_at, is_recurring";

#[cfg(test)]
pub(crate) fn test_expense(
    userid: &str,
    category_id: CategoryId,
    date: PrimitiveDateTime,
) -> Expense {
    Expense {
        id: 0,
        userid: userid.to_owned(),
        category_id,
        amount: 42.5,
        currency: Some("NZD".to_owned()),
        date,
        payment_method: Some("card".to_owned()),
        notes: None,
        created_at: None,
        updated_at: None,
        is_recurring: Some(false),
    }
}
