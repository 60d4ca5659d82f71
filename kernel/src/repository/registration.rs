use crate::model::{
    id::{EventId, UserId},
    registration::{
        event::{CancelRegistration, CreateRegistration},
        Registration,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // 定員を確認した上で参加登録を行う
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration>;
    // 参加登録をキャンセル状態にする。対象がなくても成功とする
    async fn cancel(&self, event: CancelRegistration) -> AppResult<()>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>>;
    async fn find_by_event_id(&self, event_id: EventId) -> AppResult<Vec<Registration>>;
}
