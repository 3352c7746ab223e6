//! Expense Tracker is the REST backend for a personal expense-tracking web
//! app: JWT-authenticated users, categories, monthly budgets, and expense
//! listings over a SQLite database.
//!
//! Every endpoint responds with the uniform envelope defined in
//! [envelope::ApiResponse].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod budget;
mod calendar;
mod category;
mod db;
mod endpoints;
mod envelope;
mod expense;
mod expense_tag;
mod logging;
pub mod pagination;
mod password;
mod routing;
mod timezone;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use password::PasswordHash;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A user tried to register with a user ID that is already taken.
    #[error("the user ID already exists in the database")]
    DuplicateUserId,

    /// A budget already exists for the same user, category, and month label.
    ///
    /// The `budgets` table carries a unique index over
    /// (userid, category_id, month), so of two concurrent inserts for the
    /// same key exactly one lands here.
    #[error("a budget already exists for this category and month")]
    DuplicateBudget,

    /// A query referenced a row that does not exist (e.g., a budget pointing
    /// at a deleted category), or a delete would orphan dependent rows.
    #[error("the operation violates a foreign key constraint")]
    ForeignKeyViolation,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general internal error message.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::ForeignKeyViolation
            }
            // Code 2067 occurs when a UNIQUE constraint failed. SQLite
            // describes the violation by the indexed columns, not the index
            // name.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067
                    && desc.contains("budgets.userid, budgets.category_id, budgets.month") =>
            {
                Error::DuplicateBudget
            }
            // Code 1555 occurs when a PRIMARY KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if (sql_error.extended_code == 2067 || sql_error.extended_code == 1555)
                    && desc.contains("users.userid") =>
            {
                Error::DuplicateUserId
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
