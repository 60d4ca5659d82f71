use std::sync::Arc;

use adapter::repository::{
    auth::AuthRepositoryImpl, event::EventRepositoryImpl, expense::ExpenseRepositoryImpl,
    health::HealthCheckRepositoryImpl, registration::RegistrationRepositoryImpl,
    report::ReportRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use derive_new::new;
use kernel::repository::{
    auth::AuthRepository, event::EventRepository, expense::ExpenseRepository,
    health::HealthCheckRepository, registration::RegistrationRepository,
    report::ReportRepository, user::UserRepository,
};
use shared::config::AppConfig;

// ハンドラーから各リポジトリを参照するための入れ物。
// テストではモック実装を差し込めるよう、フィールドはトレイトオブジェクトで持つ
#[derive(Clone, new)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    event_repository: Arc<dyn EventRepository>,
    registration_repository: Arc<dyn RegistrationRepository>,
    expense_repository: Arc<dyn ExpenseRepository>,
    report_repository: Arc<dyn ReportRepository>,
}

impl AppRegistry {
    pub fn from_pool(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            &app_config.auth.secret,
            app_config.auth.ttl,
        ));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let registration_repository = Arc::new(RegistrationRepositoryImpl::new(pool.clone()));
        let expense_repository = Arc::new(ExpenseRepositoryImpl::new(pool.clone()));
        let report_repository = Arc::new(ReportRepositoryImpl::new(pool));
        Self {
            health_check_repository,
            user_repository,
            auth_repository,
            event_repository,
            registration_repository,
            expense_repository,
            report_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn registration_repository(&self) -> Arc<dyn RegistrationRepository> {
        self.registration_repository.clone()
    }

    pub fn expense_repository(&self) -> Arc<dyn ExpenseRepository> {
        self.expense_repository.clone()
    }

    pub fn report_repository(&self) -> Arc<dyn ReportRepository> {
        self.report_repository.clone()
    }
}
