use super::{
    auth::build_auth_routers, event::build_event_routers, expense::build_expense_routers,
    health::build_health_check_routers, registration::build_registration_routers,
    user::build_user_router,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_router())
        .merge(build_event_routers())
        .merge(build_registration_routers())
        .merge(build_expense_routers());
    Router::new().nest("/api/v1", router)
}
