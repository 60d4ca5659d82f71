use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::expense::{add_expense, delete_expense, show_budget_totals, show_expense_list};

pub fn build_expense_routers() -> Router<AppRegistry> {
    Router::new()
        .route(
            "/events/:event_id/expenses",
            get(show_expense_list).post(add_expense),
        )
        .route("/events/:event_id/expenses/totals", get(show_budget_totals))
        .route("/expenses/:expense_id", delete(delete_expense))
}
