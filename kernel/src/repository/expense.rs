use crate::model::{
    expense::{
        event::{CreateExpense, DeleteExpense},
        BudgetTotals, Expense, RecordedExpense,
    },
    id::EventId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    // 台帳に支出を追記し、累計と残予算を返す
    async fn create(&self, event: CreateExpense) -> AppResult<RecordedExpense>;
    // 登録順に並べて返す
    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Expense>>;
    async fn totals(&self, event_id: EventId) -> AppResult<BudgetTotals>;
    async fn delete(&self, event: DeleteExpense) -> AppResult<()>;
}
