use super::lock_event_row;
use crate::database::{
    model::registration::{RegistrationRow, StudentSnapshotRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{
        ensure_seat_available,
        event::{CancelRegistration, CreateRegistration},
        Registration, RegistrationStatus,
    },
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration> {
        let mut tx = self.db.begin().await?;

        // ① 学生の存在確認。氏名とメールアドレスはスナップショットとして保存する
        let student = sqlx::query_as::<_, StudentSnapshotRow>(
            r#"
                SELECT name, email
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from_store)?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("ユーザー（{}）が見つかりませんでした。", event.user_id))
        })?;

        // ② イベント行をロックしてから登録者数を数える。
        // 同一イベントへの同時登録はここで直列化されるため、定員を超えて登録されることはない
        let target = lock_event_row(&mut tx, event.event_id).await?;
        let current_registered = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*)
                FROM registrations
                WHERE event_id = $1 AND status = 'Registered'
            "#,
        )
        .bind(event.event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        ensure_seat_available(target.max_students, current_registered)?;

        // ③ 参加登録を行う
        let registration_id = RegistrationId::new();
        let registered_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
                INSERT INTO registrations
                (registration_id, user_id, event_id, student_name, email_id, event_name, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'Registered')
                RETURNING registered_at
            "#,
        )
        .bind(registration_id)
        .bind(event.user_id)
        .bind(event.event_id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(&target.event_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        tx.commit().await.map_err(AppError::from_transaction)?;

        tracing::info!(
            %registration_id,
            user_id = %event.user_id,
            event_id = %event.event_id,
            seats_taken = current_registered + 1,
            capacity = target.max_students,
            "registration accepted"
        );

        Ok(Registration {
            registration_id,
            user_id: event.user_id,
            event_id: event.event_id,
            student_name: student.name,
            email_id: student.email,
            event_name: target.event_name,
            status: RegistrationStatus::Registered,
            registered_at,
        })
    }

    async fn cancel(&self, event: CancelRegistration) -> AppResult<()> {
        // 論理削除。対象の登録がない、または既にキャンセル済みでも成功として扱う
        let res = sqlx::query(
            r#"
                UPDATE registrations
                SET status = 'Cancelled'
                WHERE user_id = $1 AND event_id = $2 AND status = 'Registered'
            "#,
        )
        .bind(event.user_id)
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?;

        tracing::info!(
            user_id = %event.user_id,
            event_id = %event.event_id,
            cancelled = res.rows_affected(),
            "registration cancelled"
        );

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT
                registration_id,
                user_id,
                event_id,
                student_name,
                email_id,
                event_name,
                status,
                registered_at
                FROM registrations
                WHERE user_id = $1 AND status = 'Registered'
                ORDER BY registered_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .into_iter()
        .map(Registration::try_from)
        .collect()
    }

    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT
                registration_id,
                user_id,
                event_id,
                student_name,
                email_id,
                event_name,
                status,
                registered_at
                FROM registrations
                WHERE event_id = $1 AND status = 'Registered'
                ORDER BY registered_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .into_iter()
        .map(Registration::try_from)
        .collect()
    }
}
