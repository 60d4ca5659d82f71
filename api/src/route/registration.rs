use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::registration::{
    cancel_registration, register_for_event, show_event_registrations, show_my_registrations,
};

pub fn build_registration_routers() -> Router<AppRegistry> {
    Router::new()
        .route(
            "/events/:event_id/registrations",
            get(show_event_registrations)
                .post(register_for_event)
                .delete(cancel_registration),
        )
        .route("/registrations/me", get(show_my_registrations))
}
