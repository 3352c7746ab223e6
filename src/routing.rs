//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::{
    AppState,
    auth::{
        forgot_password_endpoint, log_in_endpoint, me_endpoint, register_endpoint,
        update_user_endpoint,
    },
    budget::{create_budget_endpoint, get_budgets_endpoint, update_budget_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_all_expenses_endpoint,
        get_current_expenses_endpoint, get_custom_expenses_endpoint,
        get_six_months_expenses_endpoint, update_expense_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except the `/auth` sign-up and sign-in routes requires a
/// valid bearer token; the token check happens in the `Claims` extractor on
/// each protected handler.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route(endpoints::REGISTER, post(register_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint))
        .route(endpoints::FORGOT_PASSWORD, post(forgot_password_endpoint))
        .route(endpoints::UPDATE_USER, post(update_user_endpoint))
        .route(endpoints::ME, get(me_endpoint));

    let category_routes = Router::new()
        .route(endpoints::GET_CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::ADD_CATEGORY, post(create_category_endpoint))
        .route(endpoints::UPDATE_CATEGORY, post(update_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint));

    let budget_routes = Router::new()
        .route(endpoints::GET_BUDGETS, get(get_budgets_endpoint))
        .route(endpoints::ADD_BUDGET, post(create_budget_endpoint))
        .route(endpoints::UPDATE_BUDGET, post(update_budget_endpoint));

    let expense_routes = Router::new()
        .route(endpoints::GET_ALL_EXPENSES, get(get_all_expenses_endpoint))
        .route(
            endpoints::GET_SIX_MONTHS_EXPENSES,
            get(get_six_months_expenses_endpoint),
        )
        .route(
            endpoints::GET_CUSTOM_EXPENSES,
            get(get_custom_expenses_endpoint),
        )
        .route(
            endpoints::GET_CURRENT_EXPENSES,
            get(get_current_expenses_endpoint),
        )
        .route(endpoints::ADD_EXPENSES, post(create_expense_endpoint))
        .route(endpoints::UPDATE_EXPENSE, post(update_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint));

    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .merge(auth_routes)
        .merge(category_routes)
        .merge(budget_routes)
        .merge(expense_routes)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}
