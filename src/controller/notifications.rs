//! Notification maintenance endpoints
//!
//! Token-protected views over the in-memory notification center plus a
//! forced scan + drain cycle.

use actix_web::{get, web, Responder};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::{ApiError, Error},
    handler::run_notification_cycle,
};

#[derive(Debug, Deserialize)]
pub struct NotificationsQuery {
    auth: Option<String>,
    limit: Option<usize>,
}

fn check_auth(
    state: &AppState<State>,
    query: &NotificationsQuery,
) -> Result<(), Error> {
    let auth = query.auth.to_owned().context("Auth is required")?;

    if auth != state.config.auth {
        return Err(Error::Unauthorized(String::from(
            "invalid maintenance token",
        )));
    }

    Ok(())
}

#[get("/notifications/pending")]
pub async fn get_pending(
    state: web::Data<AppState<State>>,
    query: web::Query<NotificationsQuery>,
) -> Result<impl Responder, ApiError> {
    check_auth(&state, &query)?;

    Ok(web::Json(state.notifications.pending()))
}

#[get("/notifications/history")]
pub async fn get_history(
    state: web::Data<AppState<State>>,
    query: web::Query<NotificationsQuery>,
) -> Result<impl Responder, ApiError> {
    check_auth(&state, &query)?;

    let limit = query.limit.unwrap_or(100);
    Ok(web::Json(state.notifications.history(limit)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub delivered: usize,
}

#[get("/notifications/run")]
pub async fn run_cycle(
    state: web::Data<AppState<State>>,
    query: web::Query<NotificationsQuery>,
) -> Result<impl Responder, ApiError> {
    check_auth(&state, &query)?;

    let delivered = run_notification_cycle(&state).await?;
    Ok(web::Json(RunResponse { delivered }))
}
