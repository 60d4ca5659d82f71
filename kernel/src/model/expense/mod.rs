use crate::model::{
    event::MAX_AMOUNT,
    id::{EventId, ExpenseId},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug, Clone)]
pub struct Expense {
    pub expense_id: ExpenseId,
    pub event_id: EventId,
    pub category: String,
    pub actual_spent: Decimal,
    // 以下 2 つは登録時点のスナップショット
    pub total_budget: Decimal,
    pub total_amount_spent: Decimal,
    pub created_at: DateTime<Utc>,
}

/// The running total stamped on a new ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub total_budget: Decimal,
    pub total_amount_spent: Decimal,
    pub remaining_budget: Decimal,
}

impl LedgerEntry {
    /// `last_total` is the stamped total of the most recently inserted row
    /// for the event, or `None` when the ledger is empty. The remaining
    /// budget may go negative; overspending is recorded, not blocked.
    /// A running total that no longer fits the money column is refused.
    pub fn next(
        total_budget: Decimal,
        last_total: Option<Decimal>,
        actual_spent: Decimal,
    ) -> AppResult<Self> {
        let total_amount_spent = last_total
            .unwrap_or(Decimal::ZERO)
            .checked_add(actual_spent)
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "支出の累計額が上限（{MAX_AMOUNT}）を超えるため登録できません"
                ))
            })?;
        let remaining_budget = total_budget
            .checked_sub(total_amount_spent)
            .ok_or_else(|| {
                AppError::ValidationError("残予算を計算できませんでした".into())
            })?;
        Ok(Self {
            total_budget,
            total_amount_spent,
            remaining_budget,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedExpense {
    pub expense_id: ExpenseId,
    pub total_amount_spent: Decimal,
    pub remaining_budget: Decimal,
}

// 台帳から都度集計した合計値。登録時のスナップショットではなくこちらが正となる
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetTotals {
    pub total_budget: Decimal,
    pub total_actual: Decimal,
    pub remaining_budget: Decimal,
}

impl BudgetTotals {
    pub fn new(total_budget: Decimal, total_actual: Decimal) -> Self {
        Self {
            total_budget,
            total_actual,
            remaining_budget: total_budget - total_actual,
        }
    }
}
