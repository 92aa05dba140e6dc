use crate::dispatch::{self, Intent};
use crate::errors::AppError;
use crate::export;
use crate::metrics::{self, ActivityLevel, BmiReading, DietGoal, DietPlan, DietType};
use crate::pulse::PulseView;
use crate::records::{HydrationSettings, HydrationSettingsUpdate, StoreKind};
use crate::render::{self, StoreView};
use crate::state::AppState;
use crate::storage;
use crate::validate;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub async fn overview(State(state): State<AppState>) -> Json<Vec<StoreView>> {
    let stores = state.stores.lock().await;
    Json(render::render_overview(&stores))
}

pub async fn store_view(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
) -> Json<StoreView> {
    let stores = state.stores.lock().await;
    Json(render::render_store(&stores, kind))
}

pub async fn intent(
    State(state): State<AppState>,
    Json(intent): Json<Intent>,
) -> Result<Json<StoreView>, AppError> {
    let view = dispatch::dispatch(&state, intent).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub revoked: usize,
    pub view: StoreView,
}

pub async fn revoke_invites(
    State(state): State<AppState>,
    Json(payload): Json<RevokeRequest>,
) -> Result<Json<RevokeResponse>, AppError> {
    let (revoked, view) = dispatch::revoke_invites(&state, &payload.email).await?;
    Ok(Json(RevokeResponse { revoked, view }))
}

pub async fn export_json(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
) -> Result<impl IntoResponse, AppError> {
    let stores = state.stores.lock().await;
    let body = export::export_json(stores.get(kind).all())?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Path(kind): Path<StoreKind>,
) -> impl IntoResponse {
    let stores = state.stores.lock().await;
    let body = export::export_csv(kind, stores.get(kind).all());
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body)
}

pub async fn hydration_settings(State(state): State<AppState>) -> Json<HydrationSettings> {
    let stores = state.stores.lock().await;
    Json(stores.hydration_settings.clone())
}

pub async fn update_hydration_settings(
    State(state): State<AppState>,
    Json(update): Json<HydrationSettingsUpdate>,
) -> Result<Json<HydrationSettings>, AppError> {
    let mut stores = state.stores.lock().await;
    let settings = validate::validate_hydration_settings(&stores.hydration_settings, update)?;
    storage::persist_hydration_settings(&state.data_dir, &settings).await?;
    stores.hydration_settings = settings.clone();
    Ok(Json(settings))
}

#[derive(Debug, Deserialize)]
pub struct BmiQuery {
    pub height_cm: f64,
    pub weight_kg: f64,
}

fn checked_body(query: &BmiQuery) -> Result<(), AppError> {
    for (field, value) in [("height", query.height_cm), ("weight", query.weight_kg)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::bad_request(format!(
                "{field} must be a positive number"
            )));
        }
    }
    Ok(())
}

pub async fn bmi(Query(query): Query<BmiQuery>) -> Result<Json<BmiReading>, AppError> {
    checked_body(&query)?;
    Ok(Json(metrics::bmi(query.height_cm, query.weight_kg)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRequest {
    pub goal: DietGoal,
    pub diet: DietType,
    pub activity: ActivityLevel,
    pub height_cm: f64,
    pub weight_kg: f64,
}

pub async fn diet_plan(Json(request): Json<DietPlanRequest>) -> Result<Json<DietPlan>, AppError> {
    checked_body(&BmiQuery {
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
    })?;
    let reading = metrics::bmi(request.height_cm, request.weight_kg);
    Ok(Json(metrics::build_diet_plan(
        request.goal,
        request.diet,
        request.activity,
        reading,
    )))
}

pub async fn pulse(State(state): State<AppState>) -> Json<PulseView> {
    let monitor = state.pulse.lock().await;
    Json(monitor.view())
}

#[derive(Debug, Deserialize)]
pub struct PulseSampleRequest {
    pub bpm: u32,
}

pub async fn pulse_sample(
    State(state): State<AppState>,
    Json(payload): Json<PulseSampleRequest>,
) -> Result<Json<PulseView>, AppError> {
    // Sanity bounds for a decoded heart-rate byte; anything outside is a
    // transport glitch, not a reading.
    if !(20..=250).contains(&payload.bpm) {
        return Err(AppError::bad_request("bpm must be between 20 and 250"));
    }
    let mut monitor = state.pulse.lock().await;
    monitor.on_sample(payload.bpm, Utc::now().timestamp_millis());
    Ok(Json(monitor.view()))
}

#[derive(Debug, Deserialize)]
pub struct PulseErrorRequest {
    pub reason: String,
}

pub async fn pulse_error(
    State(state): State<AppState>,
    Json(payload): Json<PulseErrorRequest>,
) -> Json<PulseView> {
    let mut monitor = state.pulse.lock().await;
    monitor.mark_unavailable(payload.reason);
    Json(monitor.view())
}
