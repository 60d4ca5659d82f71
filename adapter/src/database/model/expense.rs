use chrono::{DateTime, Utc};
use kernel::model::{
    expense::{BudgetTotals, Expense},
    id::{EventId, ExpenseId, UserId},
};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct ExpenseRow {
    pub expense_id: ExpenseId,
    pub event_id: EventId,
    pub category: String,
    pub actual_spent: Decimal,
    pub total_budget: Decimal,
    pub total_amount_spent: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(value: ExpenseRow) -> Self {
        let ExpenseRow {
            expense_id,
            event_id,
            category,
            actual_spent,
            total_budget,
            total_amount_spent,
            created_at,
        } = value;
        Expense {
            expense_id,
            event_id,
            category,
            actual_spent,
            total_budget,
            total_amount_spent,
            created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct BudgetTotalsRow {
    pub total_budget: Decimal,
    pub total_actual: Decimal,
}

impl From<BudgetTotalsRow> for BudgetTotals {
    fn from(value: BudgetTotalsRow) -> Self {
        BudgetTotals::new(value.total_budget, value.total_actual)
    }
}

// 支出の削除権限を確認するための型
#[derive(sqlx::FromRow)]
pub struct ExpenseOwnerRow {
    pub event_id: EventId,
    pub organizer_id: UserId,
}
