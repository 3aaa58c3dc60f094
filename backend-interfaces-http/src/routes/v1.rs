use axum::routing::{delete, get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{check_in_handlers, guest_handlers, ops_handlers, scan_session_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events/:event_id/check-in",
            get(guest_handlers::get_check_in_page),
        )
        .route("/v1/events/:event_id/stats", get(guest_handlers::get_stats))
        .route(
            "/v1/events/:event_id/check-in/scan",
            post(check_in_handlers::scan_ticket),
        )
        .route(
            "/v1/events/:event_id/rsvps/:rsvp_id/check-in",
            post(check_in_handlers::check_in_guest),
        )
        .route(
            "/v1/events/:event_id/scan-sessions",
            post(scan_session_handlers::start_session),
        )
        .route(
            "/v1/scan-sessions/:session_id/frames",
            post(scan_session_handlers::submit_frame),
        )
        .route(
            "/v1/scan-sessions/:session_id",
            delete(scan_session_handlers::stop_session),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
