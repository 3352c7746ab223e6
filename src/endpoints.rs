//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/deleteExpense/{id}',
//! use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";

/// The route for registering a new user.
pub const REGISTER: &str = "/auth/register";
/// The route for signing in.
pub const LOG_IN: &str = "/auth/login";
/// The route for resetting a forgotten password.
pub const FORGOT_PASSWORD: &str = "/auth/forgotPassword";
/// The route for updating a user's profile.
pub const UPDATE_USER: &str = "/auth/updateUser";
/// The token-check route.
pub const ME: &str = "/auth/me";

/// The route for listing a user's categories.
pub const GET_CATEGORIES: &str = "/category/getCategories/{userId}";
/// The route for creating a category.
pub const ADD_CATEGORY: &str = "/category/addCategory";
/// The route for updating a category.
pub const UPDATE_CATEGORY: &str = "/category/updateCategory";
/// The route for deleting a category.
pub const DELETE_CATEGORY: &str = "/category/deleteCategory/{id}";

/// The route for listing a user's budgets for the current month.
pub const GET_BUDGETS: &str = "/budgets/getBudgets/{userId}";
/// The route for creating a budget.
pub const ADD_BUDGET: &str = "/budgets/addBudget";
/// The route for updating a budget.
pub const UPDATE_BUDGET: &str = "/budgets/updateBudget";

/// The route for the paginated expense listing.
pub const GET_ALL_EXPENSES: &str = "/expenses/getAllExpenses";
/// The route for listing the last six months of expenses.
pub const GET_SIX_MONTHS_EXPENSES: &str = "/expenses/getSixMonthsExpenses/{userId}";
/// The route for listing expenses over a custom number of whole months.
pub const GET_CUSTOM_EXPENSES: &str = "/expenses/getCustomExpenses/{userId}/{duration}";
/// The route for listing the current month's expenses.
pub const GET_CURRENT_EXPENSES: &str = "/expenses/getCurrentExpenses/{userId}";
/// The route for recording an expense.
pub const ADD_EXPENSES: &str = "/expenses/addExpenses";
/// The route for updating an expense.
pub const UPDATE_EXPENSE: &str = "/expenses/updateExpense";
/// The route for deleting an expense.
pub const DELETE_EXPENSE: &str = "/expenses/deleteExpense/{id}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// letters or underscores, and ends with a right brace. For example, in the
/// endpoint path '/expenses/deleteExpense/{id}', '{id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
