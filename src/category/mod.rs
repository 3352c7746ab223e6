//! Expense categories and the transient budget amount attached when listing
//! them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod update_endpoint;

pub use core::{Category, CategoryId, create_categories_table, insert_category};
pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
pub use list_endpoint::get_categories_endpoint;
pub use update_endpoint::update_category_endpoint;

#[cfg(test)]
pub(crate) use core::test_category;
