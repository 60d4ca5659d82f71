use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    event::{
        delete_event, register_event, show_approved_event_list, show_event, show_event_list,
        show_my_event_list, show_pending_event_list, update_event, update_event_status,
    },
    report::{show_event_report, show_my_event_report},
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", get(show_event_list).post(register_event))
        .route("/pending", get(show_pending_event_list))
        .route("/approved", get(show_approved_event_list))
        .route("/mine", get(show_my_event_list))
        .route("/reports", get(show_event_report))
        .route("/mine/reports", get(show_my_event_report))
        .route(
            "/:event_id",
            get(show_event).put(update_event).delete(delete_event),
        )
        .route("/:event_id/status", put(update_event_status));

    Router::new().nest("/events", events_routers)
}
