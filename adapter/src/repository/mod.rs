pub mod auth;
pub mod event;
pub mod expense;
pub mod health;
pub mod registration;
pub mod report;
pub mod user;

use crate::database::model::event::EventStateRow;
use kernel::model::id::{EventId, UserId};
use shared::error::{AppError, AppResult};

type PgTransaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

// イベント行を FOR NO KEY UPDATE でロックして取得する。
// 参加登録・支出登録・イベント更新は同一イベントに対してこのロックで直列化される。
// NO KEY UPDATE とすることで、外部キー参照による KEY SHARE ロックとは競合しない
pub(crate) async fn lock_event_row(
    tx: &mut PgTransaction<'_>,
    event_id: EventId,
) -> AppResult<EventStateRow> {
    sqlx::query_as::<_, EventStateRow>(
        r#"
            SELECT organizer_id, event_name, date_time, max_students, total_budget, status
            FROM events
            WHERE event_id = $1
            FOR NO KEY UPDATE
        "#,
    )
    .bind(event_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::from_store)?
    .ok_or_else(|| AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。")))
}

// 主催者のユーザー行をロックする。
// 同一主催者によるイベント登録・更新を直列化し、重複チェックと INSERT の間の競合を防ぐ
pub(crate) async fn lock_organizer_row(
    tx: &mut PgTransaction<'_>,
    organizer_id: UserId,
) -> AppResult<()> {
    sqlx::query_scalar::<_, UserId>(
        r#"
            SELECT user_id
            FROM users
            WHERE user_id = $1
            FOR NO KEY UPDATE
        "#,
    )
    .bind(organizer_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::from_store)?
    .map(|_| ())
    .ok_or_else(|| AppError::EntityNotFound(format!("ユーザー（{organizer_id}）が見つかりませんでした。")))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, Utc};
    use kernel::model::{
        auth::AccessIdentity,
        id::{EventId, UserId},
        role::Role,
    };
    use rust_decimal::Decimal;
    use sqlx::PgPool;

    pub async fn insert_user(pool: &PgPool, name: &str, role: Role) -> AccessIdentity {
        let user_id = UserId::new();
        sqlx::query(
            r#"
                INSERT INTO users (user_id, name, email, password_hash, role)
                VALUES ($1, $2, $3, 'not-a-real-hash', $4)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(format!("{user_id}@example.com"))
        .bind(role.as_ref())
        .execute(pool)
        .await
        .unwrap();
        AccessIdentity::new(user_id, role)
    }

    pub fn next_week() -> DateTime<Utc> {
        Utc::now() + Duration::days(7)
    }

    pub async fn insert_event(
        pool: &PgPool,
        organizer_id: UserId,
        event_name: &str,
        status: &str,
        max_students: i32,
        total_budget: i64,
    ) -> EventId {
        let event_id = EventId::new();
        let rejection_reason = (status == "rejected").then_some("rejected in fixture");
        sqlx::query(
            r#"
                INSERT INTO events
                (event_id, organizer_id, event_name, date_time, venue,
                description, max_students, total_budget, status, rejection_reason)
                VALUES ($1, $2, $3, $4, 'Main Hall', '', $5, $6, $7, $8)
            "#,
        )
        .bind(event_id)
        .bind(organizer_id)
        .bind(event_name)
        .bind(next_week())
        .bind(max_students)
        .bind(Decimal::from(total_budget))
        .bind(status)
        .bind(rejection_reason)
        .execute(pool)
        .await
        .unwrap();
        event_id
    }
}
