use crate::model::{
    event::{
        event::{CreateEvent, DeleteEvent, TransitionEventStatus, UpdateEvent},
        Event, EventStatus,
    },
    id::{EventId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    // 承認待ちのイベントを作成する。同名・未来日時の有効なイベントがあればエラー
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    // 承認待ちのイベントのみ更新できる
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    // 管理者によるステータス変更（承認・却下）
    async fn transition_status(&self, event: TransitionEventStatus) -> AppResult<()>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn find_by_organizer(
        &self,
        organizer_id: UserId,
        status: EventStatus,
    ) -> AppResult<Vec<Event>>;
    async fn find_pending(&self) -> AppResult<Vec<Event>>;
    // 承認済みかつ開催日時が現在以降のイベント
    async fn find_approved_upcoming(&self) -> AppResult<Vec<Event>>;
}
