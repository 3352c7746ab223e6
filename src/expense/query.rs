//! Read queries over the expenses table.

use rusqlite::{Connection, params};
use time::PrimitiveDateTime;

use crate::{
    Error,
    expense::core::{EXPENSE_COLUMNS, Expense, map_row_to_expense},
};

/// Count how many expenses `userid` has in total.
pub fn count_expenses_for_user(userid: &str, connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM expenses WHERE userid = ?1",
        params![userid],
        |row| row.get(0),
    )?;

    Ok(count as u64)
}

/// Retrieve one page of `userid`'s expenses, newest first.
///
/// `page` is zero based. Ties on `date` are broken by insertion order so
/// that paging is stable.
pub fn get_expense_page(
    userid: &str,
    page: u64,
    size: u64,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    // SQLite evaluates LIMIT and OFFSET as i64, so clamp out-of-range
    // requests instead of overflowing.
    let limit = i64::try_from(size).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.saturating_mul(size)).unwrap_or(i64::MAX);

    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE userid = ?1
            ORDER BY date DESC, id ASC
            LIMIT {limit} OFFSET {offset}"
        ))?
        .query_map(params![userid], map_row_to_expense)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all of `userid`'s expenses dated strictly after `start`.
pub fn get_expenses_after(
    userid: &str,
    start: PrimitiveDateTime,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE userid = ?1 AND date > ?2"
        ))?
        .query_map(params![userid, start], map_row_to_expense)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all of `userid`'s expenses dated between `start` and `end`
/// inclusive.
pub fn get_expenses_between(
    userid: &str,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE userid = ?1 AND date BETWEEN ?2 AND ?3"
        ))?
        .query_map(params![userid, start, end], map_row_to_expense)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}
