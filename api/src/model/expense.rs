use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::AccessIdentity,
    expense::{event::CreateExpense, BudgetTotals, Expense, RecordedExpense},
    id::{EventId, ExpenseId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[garde(length(min = 1))]
    pub category: String,
    #[garde(skip)]
    pub actual_spent: Decimal,
}

#[derive(new)]
pub struct CreateExpenseRequestWithIds(EventId, AccessIdentity, CreateExpenseRequest);
impl From<CreateExpenseRequestWithIds> for CreateExpense {
    fn from(value: CreateExpenseRequestWithIds) -> Self {
        let CreateExpenseRequestWithIds(
            event_id,
            requested_user,
            CreateExpenseRequest {
                category,
                actual_spent,
            },
        ) = value;
        CreateExpense {
            event_id,
            category,
            actual_spent,
            requested_user,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedExpenseResponse {
    pub expense_id: ExpenseId,
    pub total_amount_spent: Decimal,
    pub remaining_budget: Decimal,
}

impl From<RecordedExpense> for RecordedExpenseResponse {
    fn from(value: RecordedExpense) -> Self {
        let RecordedExpense {
            expense_id,
            total_amount_spent,
            remaining_budget,
        } = value;
        Self {
            expense_id,
            total_amount_spent,
            remaining_budget,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesResponse {
    pub items: Vec<ExpenseResponse>,
}

impl From<Vec<Expense>> for ExpensesResponse {
    fn from(value: Vec<Expense>) -> Self {
        Self {
            items: value.into_iter().map(ExpenseResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub expense_id: ExpenseId,
    pub event_id: EventId,
    pub category: String,
    pub actual_spent: Decimal,
    pub total_budget: Decimal,
    pub total_amount_spent: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(value: Expense) -> Self {
        let Expense {
            expense_id,
            event_id,
            category,
            actual_spent,
            total_budget,
            total_amount_spent,
            created_at,
        } = value;
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotalsResponse {
    pub total_budget: Decimal,
    pub total_actual: Decimal,
    pub remaining_budget: Decimal,
}

impl From<BudgetTotals> for BudgetTotalsResponse {
    fn from(value: BudgetTotals) -> Self {
        let BudgetTotals {
            total_budget,
            total_actual,
            remaining_budget,
        } = value;
        Self {
            total_budget,
            total_actual,
            remaining_budget,
        }
    }
}
