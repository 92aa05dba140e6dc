use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::overview))
        .route("/api/overview", get(handlers::overview))
        .route("/api/stores/:kind", get(handlers::store_view))
        .route("/api/stores/:kind/export.json", get(handlers::export_json))
        .route("/api/stores/:kind/export.csv", get(handlers::export_csv))
        .route("/api/intent", post(handlers::intent))
        .route("/api/invites/revoke", post(handlers::revoke_invites))
        .route(
            "/api/hydration/settings",
            get(handlers::hydration_settings).post(handlers::update_hydration_settings),
        )
        .route("/api/bmi", get(handlers::bmi))
        .route("/api/diet-plan", post(handlers::diet_plan))
        .route("/api/pulse", get(handlers::pulse).post(handlers::pulse_sample))
        .route("/api/pulse/error", post(handlers::pulse_error))
        .with_state(state)
}
