//! Property and unit endpoints

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::ApiError,
    validation::{sanitize_string, validate_request, PropertyBody, UnitBody},
};

#[get("/properties")]
pub async fn get_properties(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.property.get_all().await?;
    Ok(web::Json(data))
}

#[post("/properties")]
pub async fn post_property(
    state: web::Data<AppState<State>>,
    body: web::Json<PropertyBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let property = state
        .database
        .property
        .insert(sanitize_string(&body.name), sanitize_string(&body.address))
        .await?;

    Ok(HttpResponse::Created().json(property))
}

#[derive(Debug, Deserialize)]
pub struct UnitsQuery {
    property_id: Option<i64>,
}

#[get("/units")]
pub async fn get_units(
    state: web::Data<AppState<State>>,
    query: web::Query<UnitsQuery>,
) -> Result<impl Responder, ApiError> {
    let data = match query.property_id {
        Some(property_id) => {
            state.database.unit.get_by_property(property_id).await?
        },
        None => state.database.unit.get_all().await?,
    };

    Ok(web::Json(data))
}

#[post("/units")]
pub async fn post_unit(
    state: web::Data<AppState<State>>,
    body: web::Json<UnitBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let unit = state
        .database
        .unit
        .insert(body.property_id, sanitize_string(&body.name))
        .await?;

    Ok(HttpResponse::Created().json(unit))
}
