//! Payment endpoints

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    dao::postgre::payment::PaymentHistoryRow,
    error::ApiError,
    validation::{to_decimal, validate_request, PaymentBody},
};

#[derive(Debug, Serialize)]
pub struct PaymentDetails {
    pub payment_date: chrono::DateTime<chrono::Utc>,
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub amount: bigdecimal::BigDecimal,
    pub status: String,
    pub collector_notes: Option<String>,
}

impl From<PaymentHistoryRow> for PaymentDetails {
    fn from(row: PaymentHistoryRow) -> Self {
        Self {
            payment_date: row.payment_date,
            property: row.property,
            unit: row.unit,
            tenant: row.tenant,
            amount: row.amount,
            status: row.status,
            collector_notes: row.collector_notes,
        }
    }
}

#[get("/payments")]
pub async fn get_payments(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.payment.get_all_with_details().await?;
    let payments: Vec<PaymentDetails> =
        data.into_iter().map(Into::into).collect();
    Ok(web::Json(payments))
}

#[post("/payments")]
pub async fn post_payment(
    state: web::Data<AppState<State>>,
    body: web::Json<PaymentBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let amount = to_decimal(body.amount).map_err(ApiError)?;

    let payment = state
        .database
        .payment
        .insert(
            body.lease_id,
            amount,
            body.payment_date,
            body.status.to_string(),
            body.collector_notes.to_owned(),
        )
        .await?;

    Ok(HttpResponse::Created().json(payment))
}
