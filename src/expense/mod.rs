//! Expenses and their listings: paginated, last six months, custom month
//! ranges, and the current month.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod query;
mod range_endpoints;
mod update_endpoint;

pub use core::{Expense, ExpenseId, create_expenses_table, insert_expense};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use list_endpoint::get_all_expenses_endpoint;
pub use range_endpoints::{
    get_current_expenses_endpoint, get_custom_expenses_endpoint,
    get_six_months_expenses_endpoint,
};
pub use update_endpoint::update_expense_endpoint;
