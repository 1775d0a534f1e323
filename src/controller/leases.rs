//! Lease endpoints
//!
//! Creation enforces the no-overlap invariant per unit via a date-range
//! query before insert.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    dao::postgre::lease::LeaseDetailsRow,
    error::{ApiError, Error},
    report::fmt_date,
    validation::{to_decimal, validate_request, LeaseBody},
};

#[derive(Debug, Serialize)]
pub struct LeaseDetails {
    pub id: i64,
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub start_date: String,
    pub end_date: String,
    pub rent_amount: bigdecimal::BigDecimal,
    pub deposit: Option<bigdecimal::BigDecimal>,
}

impl From<LeaseDetailsRow> for LeaseDetails {
    fn from(row: LeaseDetailsRow) -> Self {
        Self {
            id: row.id,
            property: row.property,
            unit: row.unit,
            tenant: row.tenant,
            start_date: fmt_date(&row.start_date),
            end_date: fmt_date(&row.end_date),
            rent_amount: row.rent_amount,
            deposit: row.deposit,
        }
    }
}

#[get("/leases")]
pub async fn get_leases(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.lease.get_all_with_details().await?;
    let leases: Vec<LeaseDetails> = data.into_iter().map(Into::into).collect();
    Ok(web::Json(leases))
}

#[post("/leases")]
pub async fn post_lease(
    state: web::Data<AppState<State>>,
    body: web::Json<LeaseBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let overlapping = state
        .database
        .lease
        .overlapping_exists(body.unit_id, body.start_date, body.end_date)
        .await?;

    if overlapping {
        return Err(ApiError(Error::Conflict(String::from(
            "Overlapping lease exists for this unit",
        ))));
    }

    let rent_amount = to_decimal(body.rent_amount).map_err(ApiError)?;
    let deposit = match body.deposit {
        Some(value) => Some(to_decimal(value).map_err(ApiError)?),
        None => None,
    };

    let lease = state
        .database
        .lease
        .insert(
            body.unit_id,
            body.tenant_id,
            body.start_date,
            body.end_date,
            rent_amount,
            deposit,
        )
        .await?;

    Ok(HttpResponse::Created().json(lease))
}
