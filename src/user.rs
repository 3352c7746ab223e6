//! Code for creating the users table and fetching users from the database.

use rusqlite::{Connection, Row, params};

use crate::{Error, password::PasswordHash};

/// A registered user of the application.
///
/// The user ID is a natural key chosen at registration; it is globally
/// unique and immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The unique, user-chosen ID.
    pub userid: String,
    /// The display name.
    pub username: Option<String>,
    /// The user's bcrypt password hash.
    pub password_hash: PasswordHash,
    /// Contact email address.
    pub email: Option<String>,
    /// The user's role, stored as free text (e.g. "USER").
    pub role: Option<String>,
    /// The currency new expenses and budgets default to.
    pub default_currency: Option<String>,
}

/// Create the users table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_users_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
            userid TEXT PRIMARY KEY NOT NULL,
            username TEXT,
            password TEXT NOT NULL,
            email TEXT,
            role TEXT,
            default_currency TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Insert a user row.
///
/// # Errors
/// Returns [Error::DuplicateUserId] if the user ID already exists, or
/// [Error::SqlError] for any other SQL error.
pub fn insert_user(user: &User, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO users (userid, username, password, email, role, default_currency)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.userid,
            user.username,
            user.password_hash.to_string(),
            user.email,
            user.role,
            user.default_currency,
        ],
    )?;

    Ok(())
}

/// Retrieve the user with `userid`.
///
/// # Errors
/// Returns [Error::NotFound] if no such user exists, or [Error::SqlError]
/// for any other SQL error.
pub fn get_user(userid: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT userid, username, password, email, role, default_currency
            FROM users WHERE userid = :userid",
        )?
        .query_row(&[(":userid", &userid)], map_row_to_user)
        .map_err(|error| error.into())
}

/// Overwrite the profile fields of the user with `userid`.
///
/// Only the fields passed as `Some` are written; `None` leaves the stored
/// value untouched.
///
/// # Errors
/// Returns [Error::NotFound] if no such user exists.
pub fn update_user_profile(
    userid: &str,
    username: Option<&str>,
    password_hash: Option<&PasswordHash>,
    email: Option<&str>,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE users SET
            username = COALESCE(?1, username),
            password = COALESCE(?2, password),
            email = COALESCE(?3, email)
        WHERE userid = ?4",
        params![
            username,
            password_hash.map(PasswordHash::to_string),
            email,
            userid
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Replace the stored password hash of the user with `userid`.
///
/// # Errors
/// Returns [Error::NotFound] if no such user exists.
pub fn update_password(
    userid: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE users SET password = ?1 WHERE userid = ?2",
        params![password_hash.to_string(), userid],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_hash: String = row.get(2)?;

    Ok(User {
        userid: row.get(0)?,
        username: row.get(1)?,
        password_hash: PasswordHash::new_unchecked(&raw_hash),
        email: row.get(3)?,
        role: row.get(4)?,
        default_currency: row.get(5)?,
    })
}

#[cfg(test)]
pub(crate) fn test_user(userid: &str) -> User {
    // Cost 4 keeps the hashing fast in tests.
    User {
        userid: userid.to_owned(),
        username: Some(format!("{userid}-name")),
        password_hash: PasswordHash::from_raw_password("hunter2", 4).unwrap(),
        email: Some(format!("{userid}@test.com")),
        role: Some("USER".to_owned()),
        default_currency: Some("NZD".to_owned()),
    }
}
