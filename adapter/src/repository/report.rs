use crate::database::{
    model::report::{MonthlyEventCountRow, RegistrationStatRow, StatusCountRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::report::{
    EventReport, MonthlyEventCount, RegistrationStat, ReportScope, StatusCount,
};
use kernel::repository::report::ReportRepository;
use shared::error::{AppError, AppResult};

// 月別件数は直近 6 か月分、定員充足率は上位 5 件を返す
const MONTHS_IN_REPORT: i64 = 6;
const TOP_EVENTS_IN_REPORT: i64 = 5;

#[derive(new)]
pub struct ReportRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn event_report(&self, scope: ReportScope) -> AppResult<EventReport> {
        // 主催者を指定しない場合（$1 が NULL）は全イベントを集計する
        let organizer_id = scope.organizer_id();

        let status_counts = sqlx::query_as::<_, StatusCountRow>(
            r#"
                SELECT status, COUNT(*) AS count
                FROM events
                WHERE ($1::uuid IS NULL OR organizer_id = $1)
                GROUP BY status
                ORDER BY status
            "#,
        )
        .bind(organizer_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .into_iter()
        .map(StatusCount::try_from)
        .collect::<AppResult<Vec<_>>>()?;

        let monthly_events = sqlx::query_as::<_, MonthlyEventCountRow>(
            r#"
                SELECT to_char(date_time, 'YYYY-MM') AS month, COUNT(*) AS event_count
                FROM events
                WHERE ($1::uuid IS NULL OR organizer_id = $1)
                GROUP BY month
                ORDER BY month DESC
                LIMIT $2
            "#,
        )
        .bind(organizer_id)
        .bind(MONTHS_IN_REPORT)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .into_iter()
        .map(MonthlyEventCount::from)
        .collect();

        let registration_stats = sqlx::query_as::<_, RegistrationStatRow>(
            r#"
                SELECT
                e.event_id,
                e.event_name,
                e.max_students,
                COUNT(r.registration_id) AS registered_count,
                ROUND(COUNT(r.registration_id) * 100.0 / e.max_students)::BIGINT AS fill_percentage
                FROM events AS e
                LEFT JOIN registrations AS r
                    ON r.event_id = e.event_id AND r.status = 'Registered'
                WHERE e.status = 'approved'
                  AND ($1::uuid IS NULL OR e.organizer_id = $1)
                GROUP BY e.event_id
                ORDER BY fill_percentage DESC, e.event_name ASC
                LIMIT $2
            "#,
        )
        .bind(organizer_id)
        .bind(TOP_EVENTS_IN_REPORT)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .into_iter()
        .map(RegistrationStat::from)
        .collect();

        Ok(EventReport {
            status_counts,
            monthly_events,
            registration_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{insert_event, insert_user};
    use kernel::model::{event::EventStatus, role::Role};

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_event_report_scopes(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let alice = insert_user(&pool, "Alice", Role::Organizer).await;
        let bob = insert_user(&pool, "Bob", Role::Organizer).await;
        insert_event(&pool, alice.user_id, "A1", "approved", 4, 0).await;
        insert_event(&pool, alice.user_id, "A2", "pending", 4, 0).await;
        insert_event(&pool, bob.user_id, "B1", "rejected", 4, 0).await;
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool));

        let all = repo.event_report(ReportScope::All).await?;
        let total: i64 = all.status_counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 3);
        assert_eq!(all.registration_stats.len(), 1);
        assert_eq!(all.registration_stats[0].fill_percentage, 0);

        let mine = repo
            .event_report(ReportScope::Organizer(alice.user_id))
            .await?;
        assert!(mine
            .status_counts
            .iter()
            .all(|c| c.status != EventStatus::Rejected));
        let total: i64 = mine.monthly_events.iter().map(|m| m.event_count).sum();
        assert_eq!(total, 2);
        Ok(())
    }
}
