//! Inspection checklist and inspection endpoints

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    dao::postgre::inspection::InspectionDetailsRow,
    error::ApiError,
    validation::{
        sanitize_string, validate_request, ChecklistBody, InspectionBody,
    },
};

#[get("/inspection-checklists")]
pub async fn get_checklists(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.inspection_checklist.get_all().await?;
    Ok(web::Json(data))
}

#[post("/inspection-checklists")]
pub async fn post_checklist(
    state: web::Data<AppState<State>>,
    body: web::Json<ChecklistBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let checklist = state
        .database
        .inspection_checklist
        .insert(sanitize_string(&body.name), body.items.to_owned())
        .await?;

    Ok(HttpResponse::Created().json(checklist))
}

#[derive(Debug, Serialize)]
pub struct InspectionDetails {
    pub id: i64,
    pub property: String,
    pub checklist: String,
    pub inspection_date: chrono::DateTime<chrono::Utc>,
    pub results: serde_json::Value,
    pub notes: Option<String>,
}

impl From<InspectionDetailsRow> for InspectionDetails {
    fn from(row: InspectionDetailsRow) -> Self {
        Self {
            id: row.id,
            property: row.property,
            checklist: row.checklist,
            inspection_date: row.inspection_date,
            results: row.results,
            notes: row.notes,
        }
    }
}

#[get("/inspections")]
pub async fn get_inspections(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.inspection.get_all_with_details().await?;
    let inspections: Vec<InspectionDetails> =
        data.into_iter().map(Into::into).collect();
    Ok(web::Json(inspections))
}

#[post("/inspections")]
pub async fn post_inspection(
    state: web::Data<AppState<State>>,
    body: web::Json<InspectionBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let inspection = state
        .database
        .inspection
        .insert(
            body.property_id,
            body.checklist_id,
            body.inspection_date,
            body.results.to_owned(),
            body.notes.as_deref().map(sanitize_string),
        )
        .await?;

    Ok(HttpResponse::Created().json(inspection))
}
