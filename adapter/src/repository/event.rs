use super::{lock_event_row, lock_organizer_row, PgTransaction};
use crate::database::{model::event::EventRow, ConnectionPool};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    event::{
        event::{CreateEvent, DeleteEvent, TransitionEventStatus, UpdateEvent},
        Event, EventStatus,
    },
    id::{EventId, UserId},
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

// 主催者の情報と現在の登録者数を含めてイベントを取得する SELECT 句
const SELECT_EVENTS: &str = r#"
    SELECT
    e.event_id,
    e.organizer_id,
    u.name AS organizer_name,
    u.email AS organizer_email,
    e.event_name,
    e.date_time,
    e.venue,
    e.description,
    e.max_students,
    e.total_budget,
    e.status,
    e.rejection_reason,
    e.created_at,
    (
        SELECT COUNT(*)
        FROM registrations AS r
        WHERE r.event_id = e.event_id AND r.status = 'Registered'
    ) AS registered_count
    FROM events AS e
    INNER JOIN users AS u ON e.organizer_id = u.user_id
"#;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        event.validate()?;

        let organizer_id = event.organizer.user_id;
        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、以下を調べる。
        // - 主催者が存在するか（同時に行ロックを取得し、同一主催者の登録を直列化する）
        // - 同名で開催日時が現在以降の、承認待ちまたは承認済みのイベントがないか
        lock_organizer_row(&mut tx, organizer_id).await?;
        self.ensure_no_duplicate(&mut tx, organizer_id, &event.event_name, None)
            .await?;

        let event_id = EventId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO events
                (event_id, organizer_id, event_name, date_time, venue,
                description, max_students, total_budget, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            "#,
        )
        .bind(event_id)
        .bind(organizer_id)
        .bind(&event.event_name)
        .bind(event.date_time)
        .bind(&event.venue)
        .bind(&event.description)
        .bind(event.max_students)
        .bind(event.total_budget)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(%event_id, %organizer_id, "event submitted for approval");

        Ok(event_id)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        event.validate()?;

        let mut tx = self.db.begin().await?;

        // ① イベントの存在確認と権限・ステータスの確認
        let current = lock_event_row(&mut tx, event.event_id).await?;
        if !event.requested_user.can_manage(current.organizer_id) {
            return Err(AppError::ForbiddenOperation(
                "イベントを編集できるのは主催者本人または管理者のみです".into(),
            ));
        }
        current.status()?.ensure_editable()?;

        // ② 名称・日時を変更する場合は重複チェックをやり直す
        if event.touches_identity() {
            lock_organizer_row(&mut tx, current.organizer_id).await?;
            let name = event.event_name.as_deref().unwrap_or(&current.event_name);
            self.ensure_no_duplicate(&mut tx, current.organizer_id, name, Some(event.event_id))
                .await?;
        }

        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    event_name = COALESCE($2, event_name),
                    date_time = COALESCE($3, date_time),
                    venue = COALESCE($4, venue),
                    description = COALESCE($5, description),
                    max_students = COALESCE($6, max_students),
                    total_budget = COALESCE($7, total_budget)
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(&event.event_name)
        .bind(event.date_time)
        .bind(&event.venue)
        .bind(&event.description)
        .bind(event.max_students)
        .bind(event.total_budget)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(event_id = %event.event_id, "event updated");

        Ok(())
    }

    async fn transition_status(&self, event: TransitionEventStatus) -> AppResult<()> {
        let rejection_reason = event.validate()?;

        let mut tx = self.db.begin().await?;
        let current = lock_event_row(&mut tx, event.event_id).await?;
        let current_status = current.status()?;

        // 現在のステータスによる遷移制限は設けない。
        // ただし却下済みのイベントを承認し直す場合は、重複チェックを満たす必要がある
        if event.target == EventStatus::Approved
            && !current_status.is_active()
            && current.date_time >= Utc::now()
        {
            lock_organizer_row(&mut tx, current.organizer_id).await?;
            self.ensure_no_duplicate(
                &mut tx,
                current.organizer_id,
                &current.event_name,
                Some(event.event_id),
            )
            .await?;
        }

        let res = sqlx::query(
            r#"
                UPDATE events
                SET status = $2, rejection_reason = $3
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(event.target.as_ref())
        .bind(rejection_reason)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event status has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(
            event_id = %event.event_id,
            from = %current_status,
            to = %event.target,
            "event status changed"
        );

        Ok(())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let current = lock_event_row(&mut tx, event.event_id).await?;
        if !event.requested_user.can_manage(current.organizer_id) {
            return Err(AppError::ForbiddenOperation(
                "イベントを削除できるのは主催者本人または管理者のみです".into(),
            ));
        }

        // 参加登録・支出は ON DELETE CASCADE で併せて削除される
        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event.event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_store)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(event_id = %event.event_id, "event deleted");

        Ok(())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let sql = format!("{SELECT_EVENTS} WHERE e.event_id = $1");
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(event_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::from_store)?
            .map(Event::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let sql = format!("{SELECT_EVENTS} ORDER BY e.created_at DESC");
        self.fetch_events(sqlx::query_as::<_, EventRow>(&sql)).await
    }

    async fn find_by_organizer(
        &self,
        organizer_id: UserId,
        status: EventStatus,
    ) -> AppResult<Vec<Event>> {
        let sql = format!(
            "{SELECT_EVENTS} WHERE e.organizer_id = $1 AND e.status = $2 ORDER BY e.created_at DESC"
        );
        self.fetch_events(
            sqlx::query_as::<_, EventRow>(&sql)
                .bind(organizer_id)
                .bind(status.as_ref()),
        )
        .await
    }

    async fn find_pending(&self) -> AppResult<Vec<Event>> {
        let sql = format!("{SELECT_EVENTS} WHERE e.status = 'pending' ORDER BY e.created_at DESC");
        self.fetch_events(sqlx::query_as::<_, EventRow>(&sql)).await
    }

    async fn find_approved_upcoming(&self) -> AppResult<Vec<Event>> {
        let sql = format!(
            "{SELECT_EVENTS} WHERE e.status = 'approved' AND e.date_time >= NOW() ORDER BY e.created_at DESC"
        );
        self.fetch_events(sqlx::query_as::<_, EventRow>(&sql)).await
    }
}

impl EventRepositoryImpl {
    // 重複登録防止のチェック。
    // 同じ主催者・同じ名前で、開催日時が現在以降の承認待ち・承認済みイベントがあればエラーとする
    async fn ensure_no_duplicate(
        &self,
        tx: &mut PgTransaction<'_>,
        organizer_id: UserId,
        event_name: &str,
        exclude: Option<EventId>,
    ) -> AppResult<()> {
        let duplicate = sqlx::query_scalar::<_, EventId>(
            r#"
                SELECT event_id
                FROM events
                WHERE organizer_id = $1
                  AND event_name = $2
                  AND status IN ('pending', 'approved')
                  AND date_time >= NOW()
                  AND ($3::uuid IS NULL OR event_id <> $3)
                LIMIT 1
            "#,
        )
        .bind(organizer_id)
        .bind(event_name)
        .bind(exclude)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::from_store)?;

        if let Some(existing) = duplicate {
            return Err(AppError::DuplicateEvent(format!(
                "同名のイベント「{event_name}」が既に申請済みです（{existing}）。"
            )));
        }
        Ok(())
    }

    async fn fetch_events<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, EventRow, sqlx::postgres::PgArguments>,
    ) -> AppResult<Vec<Event>> {
        query
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::from_store)?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }
}
