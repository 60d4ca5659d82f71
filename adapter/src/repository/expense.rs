use super::lock_event_row;
use crate::database::{
    model::expense::{BudgetTotalsRow, ExpenseOwnerRow, ExpenseRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    expense::{
        event::{CreateExpense, DeleteExpense},
        BudgetTotals, Expense, LedgerEntry, RecordedExpense,
    },
    id::{EventId, ExpenseId},
};
use kernel::repository::expense::ExpenseRepository;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ExpenseRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ExpenseRepository for ExpenseRepositoryImpl {
    async fn create(&self, event: CreateExpense) -> AppResult<RecordedExpense> {
        event.validate()?;

        let mut tx = self.db.begin().await?;

        // ① イベントの存在確認と権限の確認。
        // イベント行のロックにより、同一イベントへの支出登録は直列化され累計がずれない
        let target = lock_event_row(&mut tx, event.event_id).await?;
        if !event.requested_user.can_manage(target.organizer_id) {
            return Err(AppError::ForbiddenOperation(
                "支出を登録できるのはイベントの主催者本人または管理者のみです".into(),
            ));
        }

        // ② 直近に登録された支出の累計額を取得する（未登録なら None）
        let last_total = sqlx::query_scalar::<_, Decimal>(
            r#"
                SELECT total_amount_spent
                FROM expenses
                WHERE event_id = $1
                ORDER BY ledger_seq DESC
                LIMIT 1
            "#,
        )
        .bind(event.event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        let entry = LedgerEntry::next(target.total_budget, last_total, event.actual_spent)?;

        // ③ 累計額を記録して台帳に追記する
        let expense_id = ExpenseId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO expenses
                (expense_id, event_id, category, actual_spent, total_budget, total_amount_spent)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(expense_id)
        .bind(event.event_id)
        .bind(event.category.trim())
        .bind(event.actual_spent)
        .bind(entry.total_budget)
        .bind(entry.total_amount_spent)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No expense record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        if entry.remaining_budget < Decimal::ZERO {
            tracing::warn!(
                event_id = %event.event_id,
                total_amount_spent = %entry.total_amount_spent,
                total_budget = %entry.total_budget,
                "event is over budget"
            );
        }
        tracing::info!(%expense_id, event_id = %event.event_id, "expense recorded");

        Ok(RecordedExpense {
            expense_id,
            total_amount_spent: entry.total_amount_spent,
            remaining_budget: entry.remaining_budget,
        })
    }

    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Expense>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
                SELECT
                expense_id,
                event_id,
                category,
                actual_spent,
                total_budget,
                total_amount_spent,
                created_at
                FROM expenses
                WHERE event_id = $1
                ORDER BY ledger_seq ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn totals(&self, event_id: EventId) -> AppResult<BudgetTotals> {
        // 記録済みの累計額ではなく、台帳から都度集計する
        sqlx::query_as::<_, BudgetTotalsRow>(
            r#"
                SELECT
                e.total_budget,
                COALESCE(SUM(x.actual_spent), 0) AS total_actual
                FROM events AS e
                LEFT JOIN expenses AS x ON x.event_id = e.event_id
                WHERE e.event_id = $1
                GROUP BY e.event_id, e.total_budget
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .map(BudgetTotals::from)
        .ok_or_else(|| AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。")))
    }

    async fn delete(&self, event: DeleteExpense) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let owner = sqlx::query_as::<_, ExpenseOwnerRow>(
            r#"
                SELECT x.event_id, e.organizer_id
                FROM expenses AS x
                INNER JOIN events AS e ON x.event_id = e.event_id
                WHERE x.expense_id = $1
                FOR UPDATE OF x
            "#,
        )
        .bind(event.expense_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from_store)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("支出（{}）が見つかりませんでした。", event.expense_id))
        })?;

        if !event.requested_user.can_manage(owner.organizer_id) {
            return Err(AppError::ForbiddenOperation(
                "支出を削除できるのはイベントの主催者本人または管理者のみです".into(),
            ));
        }

        // 後続の行に記録された累計額は再計算しない。合計は totals で都度集計する
        let res = sqlx::query("DELETE FROM expenses WHERE expense_id = $1")
            .bind(event.expense_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "支出（{}）が見つかりませんでした。",
                event.expense_id
            )));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(expense_id = %event.expense_id, event_id = %owner.event_id, "expense deleted");

        Ok(())
    }
}
