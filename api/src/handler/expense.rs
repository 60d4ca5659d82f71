use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{
    expense::event::DeleteExpense,
    id::{EventId, ExpenseId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::expense::{
        BudgetTotalsResponse, CreateExpenseRequest, CreateExpenseRequestWithIds,
        ExpensesResponse, RecordedExpenseResponse,
    },
};

#[tracing::instrument(skip(user, registry, req), fields(user_id = %user.id()))]
pub async fn add_expense(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateExpenseRequest>, AppError>,
) -> AppResult<(StatusCode, Json<RecordedExpenseResponse>)> {
    req.validate()?;

    let create_expense = CreateExpenseRequestWithIds::new(event_id, user.identity(), req);
    let recorded = registry
        .expense_repository()
        .create(create_expense.into())
        .await?;

    Ok((StatusCode::CREATED, Json(recorded.into())))
}

pub async fn show_expense_list(
    _user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ExpensesResponse>> {
    registry
        .expense_repository()
        .find_by_event_id(event_id)
        .await
        .map(ExpensesResponse::from)
        .map(Json)
}

pub async fn show_budget_totals(
    _user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BudgetTotalsResponse>> {
    registry
        .expense_repository()
        .totals(event_id)
        .await
        .map(BudgetTotalsResponse::from)
        .map(Json)
}

#[tracing::instrument(skip(user, registry), fields(user_id = %user.id()))]
pub async fn delete_expense(
    user: AuthorizedUser,
    WithRejection(Path(expense_id), _): WithRejection<Path<ExpenseId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .expense_repository()
        .delete(DeleteExpense::new(expense_id, user.identity()))
        .await
        .map(|_| StatusCode::OK)
}
