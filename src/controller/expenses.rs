//! Expense endpoints
//!
//! Creation is recorded in the audit trail.

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;

use crate::{
    audit::{log_audit, AuditAction},
    configuration::{AppState, State},
    dao::postgre::expense::ExpenseReportRow,
    error::ApiError,
    validation::{sanitize_string, to_decimal, validate_request, ExpenseBody},
};

#[derive(Debug, serde::Deserialize)]
pub struct ExpensesQuery {
    property_id: Option<i64>,
    start_date: Option<chrono::DateTime<chrono::Utc>>,
    end_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseDetails {
    pub date: chrono::DateTime<chrono::Utc>,
    pub property: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: bigdecimal::BigDecimal,
}

impl From<ExpenseReportRow> for ExpenseDetails {
    fn from(row: ExpenseReportRow) -> Self {
        Self {
            date: row.date,
            property: row.property,
            category: row.category,
            description: row.description,
            amount: row.amount,
        }
    }
}

#[get("/expenses")]
pub async fn get_expenses(
    state: web::Data<AppState<State>>,
    query: web::Query<ExpensesQuery>,
) -> Result<impl Responder, ApiError> {
    let from = query
        .start_date
        .unwrap_or(chrono::DateTime::UNIX_EPOCH);
    let to = query.end_date.unwrap_or_else(chrono::Utc::now);

    let data = state
        .database
        .expense
        .get_report(from, to, query.property_id)
        .await?;
    let expenses: Vec<ExpenseDetails> =
        data.into_iter().map(Into::into).collect();

    Ok(web::Json(expenses))
}

#[post("/expenses")]
pub async fn post_expense(
    state: web::Data<AppState<State>>,
    body: web::Json<ExpenseBody>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let amount = to_decimal(body.amount).map_err(ApiError)?;

    let expense = state
        .database
        .expense
        .insert(
            body.property_id,
            sanitize_string(&body.category),
            amount,
            body.description.as_deref().map(sanitize_string),
            body.date,
        )
        .await?;

    let actor = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| String::from("unknown"));

    log_audit(
        &state,
        AuditAction::Create,
        &actor,
        json!({
            "expense_id": expense.id,
            "property_id": expense.property_id,
            "category": expense.category,
            "amount": body.amount,
        }),
    )
    .await;

    Ok(HttpResponse::Created().json(expense))
}
