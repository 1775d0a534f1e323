//! Tenant endpoints

use actix_web::{get, post, web, HttpResponse, Responder};

use crate::{
    configuration::{AppState, State},
    error::{ApiError, Error},
    validation::{sanitize_string, validate_request, TenantBody},
};

#[get("/tenants")]
pub async fn get_tenants(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.tenant.get_all().await?;
    Ok(web::Json(data))
}

#[post("/tenants")]
pub async fn post_tenant(
    state: web::Data<AppState<State>>,
    body: web::Json<TenantBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let email = body.email.trim().to_lowercase();

    if state.database.tenant.email_exists(&email).await? {
        return Err(ApiError(Error::Conflict(String::from(
            "Tenant with this email already exists",
        ))));
    }

    let tenant = state
        .database
        .tenant
        .insert(
            sanitize_string(&body.name),
            email,
            body.phone.to_owned(),
        )
        .await?;

    Ok(HttpResponse::Created().json(tenant))
}
