//! User registration endpoint

use actix_web::{post, web, HttpResponse};

use crate::{
    configuration::{AppState, State},
    error::{ApiError, Error},
    validation::{sanitize_string, validate_request, RegisterBody},
};

const BCRYPT_COST: u32 = 10;

#[post("/register")]
pub async fn post_register(
    state: web::Data<AppState<State>>,
    body: web::Json<RegisterBody>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*body)?;

    let email = body.email.trim().to_lowercase();

    if state.database.app_user.email_exists(&email).await? {
        return Err(ApiError(Error::Conflict(String::from(
            "User already exists",
        ))));
    }

    let password_hash = bcrypt::hash(&body.password, BCRYPT_COST)?;

    let user = state
        .database
        .app_user
        .insert(
            email,
            password_hash,
            body.name.as_deref().map(sanitize_string),
        )
        .await?;

    Ok(HttpResponse::Created().json(user))
}
