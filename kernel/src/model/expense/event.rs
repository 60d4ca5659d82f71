use crate::model::{
    auth::AccessIdentity,
    event::{require_text, validate_amount},
    id::{EventId, ExpenseId},
};
use derive_new::new;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

#[derive(Debug, new)]
pub struct CreateExpense {
    pub event_id: EventId,
    pub category: String,
    pub actual_spent: Decimal,
    pub requested_user: AccessIdentity,
}

impl CreateExpense {
    pub fn validate(&self) -> AppResult<()> {
        require_text("category", &self.category)?;
        validate_amount("actual_spent", self.actual_spent)
    }
}

#[derive(Debug, new)]
pub struct DeleteExpense {
    pub expense_id: ExpenseId,
    pub requested_user: AccessIdentity,
}
