//! Monthly budgets keyed by a free-text month label such as "March 2025".

mod core;
mod create_endpoint;
mod list_endpoint;
mod update_endpoint;

pub use core::{Budget, BudgetId, create_budgets_table, get_budget_amount, insert_budget};
pub use create_endpoint::create_budget_endpoint;
pub use list_endpoint::get_budgets_endpoint;
pub use update_endpoint::update_budget_endpoint;

#[cfg(test)]
pub(crate) use core::test_budget;
