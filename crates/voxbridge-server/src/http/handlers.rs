//! Route handlers. Each one is a thin adapter from the JSON body to a
//! `PresenceEngine` call.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use voxbridge_core::{PresenceEngine, WorldSnapshot};

use super::error::ApiError;
use super::wire::{
    Ack, HealthResponse, HeartbeatReport, VoiceStatesResponse, VoiceStatusReport, WorldReport,
};

pub async fn voice_status(
    State(engine): State<PresenceEngine>,
    payload: Result<Json<VoiceStatusReport>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(report) = payload?;

    match report.gamertag.as_deref() {
        Some(id) => {
            engine
                .report_voice_state(
                    id,
                    report.is_talking.unwrap_or(false),
                    report.is_muted.unwrap_or(false),
                )
                .await
        }
        None => tracing::debug!("voice-status without gamertag"),
    }

    Ok(Json(Ack::ok()))
}

pub async fn heartbeat(
    State(engine): State<PresenceEngine>,
    payload: Result<Json<HeartbeatReport>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(report) = payload?;

    match report.gamertag.as_deref() {
        Some(id) => {
            engine
                .report_heartbeat(id, report.in_voice.unwrap_or(false))
                .await
        }
        None => tracing::debug!("heartbeat without gamertag"),
    }

    Ok(Json(Ack::ok()))
}

pub async fn minecraft_data(
    State(engine): State<PresenceEngine>,
    payload: Result<Json<WorldReport>, JsonRejection>,
) -> Result<Json<VoiceStatesResponse>, ApiError> {
    let Json(report) = payload?;

    let snapshot = WorldSnapshot::from_report(report.players, report.data, report.config);
    let statuses = engine.submit_world_snapshot(snapshot).await;

    Ok(Json(VoiceStatesResponse::new(statuses)))
}

pub async fn voice_states(State(engine): State<PresenceEngine>) -> Json<VoiceStatesResponse> {
    Json(VoiceStatesResponse::new(engine.reconcile().await))
}

pub async fn health(State(engine): State<PresenceEngine>) -> Json<HealthResponse> {
    let stats = engine.stats().await;
    Json(HealthResponse {
        status: "ok",
        rostered: stats.rostered,
        participants: stats.tracked,
        connected: stats.connected,
    })
}
