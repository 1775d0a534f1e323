//! Utility provider and meter reading endpoints
//!
//! Readings are submitted as multipart form data with an optional meter
//! photo stored under the configured upload directory.

use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web, HttpResponse, Responder};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr as _};
use tokio::io::AsyncWriteExt as _;

use crate::{
    configuration::{AppState, State},
    error::{ApiError, Error},
    model::UtilityReading,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct ProviderBody {
    pub name: String,
}

#[get("/utilities")]
pub async fn get_providers(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let data = state.database.utility_provider.get_all().await?;
    Ok(web::Json(data))
}

#[post("/utilities")]
pub async fn post_provider(
    state: web::Data<AppState<State>>,
    body: web::Json<ProviderBody>,
) -> Result<HttpResponse, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError(Error::MissingParams(String::from("name"))));
    }

    let provider = state
        .database
        .utility_provider
        .insert(name.to_owned())
        .await?;

    Ok(HttpResponse::Created().json(provider))
}

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    provider_id: Option<i64>,
}

#[get("/utility-readings")]
pub async fn get_readings(
    state: web::Data<AppState<State>>,
    query: web::Query<ReadingsQuery>,
) -> Result<impl Responder, ApiError> {
    let data = match query.provider_id {
        Some(provider_id) => {
            state
                .database
                .utility_reading
                .get_by_provider(provider_id)
                .await?
        },
        None => state.database.utility_reading.get_all().await?,
    };

    Ok(web::Json(data))
}

#[post("/utility-readings")]
pub async fn post_reading(
    state: web::Data<AppState<State>>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut provider_id: Option<i64> = None;
    let mut reading: Option<BigDecimal> = None;
    let mut reading_date: Option<DateTime<Utc>> = None;
    let mut photo_url: Option<String> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| Error::ParseMessage(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "provider_id" => {
                let text = read_text_field(&mut field).await?;
                provider_id = Some(text.trim().parse().map_err(Error::INT)?);
            },
            "reading" => {
                let text = read_text_field(&mut field).await?;
                let value = BigDecimal::from_str(text.trim())
                    .map_err(Error::BigDecimalError)?;
                reading = Some(value);
            },
            "reading_date" => {
                let text = read_text_field(&mut field).await?;
                let parsed = DateTime::parse_from_rfc3339(text.trim())
                    .map_err(|e| {
                        Error::DecodeDateTimeError(format!(
                            "reading_date {}: {}",
                            text.trim(),
                            e
                        ))
                    })?;
                reading_date = Some(parsed.with_timezone(&Utc));
            },
            "photo" => {
                photo_url = Some(save_photo(&state, &mut field).await?);
            },
            _ => {
                // Drain unknown fields so the stream can advance
                while field
                    .try_next()
                    .await
                    .map_err(|e| Error::ParseMessage(e.to_string()))?
                    .is_some()
                {}
            },
        }
    }

    let provider_id = provider_id.ok_or_else(|| {
        Error::MissingParams(String::from("provider_id"))
    })?;
    let reading =
        reading.ok_or_else(|| Error::MissingParams(String::from("reading")))?;
    let reading_date = reading_date.ok_or_else(|| {
        Error::MissingParams(String::from("reading_date"))
    })?;

    if reading < BigDecimal::from(0) {
        return Err(ApiError(Error::Validation(String::from(
            "reading: Reading cannot be negative",
        ))));
    }

    let provider = state
        .database
        .utility_provider
        .get_one(provider_id)
        .await?;
    if provider.is_none() {
        return Err(ApiError(Error::NotFound(format!(
            "utility provider {}",
            provider_id
        ))));
    }

    let created: UtilityReading = state
        .database
        .utility_reading
        .insert(provider_id, reading, reading_date, photo_url)
        .await?;

    Ok(HttpResponse::Created().json(created))
}

async fn read_text_field(field: &mut Field) -> Result<String, Error> {
    let mut data = Vec::new();

    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| Error::ParseMessage(e.to_string()))?
    {
        data.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8(data)?)
}

/// Stream the uploaded photo to the upload directory, enforcing the
/// configured extension allow-list and size cap. Returns the public url.
async fn save_photo(
    state: &AppState<State>,
    field: &mut Field,
) -> Result<String, Error> {
    let extension = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .and_then(|filename| {
            Path::new(filename)
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        })
        .unwrap_or_default();

    if !state.config.allowed_file_types.contains(&extension) {
        return Err(Error::Validation(format!(
            "photo: file type '{}' is not allowed",
            extension
        )));
    }

    let filename =
        format!("reading-{}{}", Utc::now().timestamp_millis(), extension);
    let path = format!("{}/{}", state.config.upload_dir, filename);

    tokio::fs::create_dir_all(&state.config.upload_dir).await?;
    let mut file = tokio::fs::File::create(&path).await?;
    let mut written: usize = 0;

    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| Error::ParseMessage(e.to_string()))?
    {
        written += chunk.len();
        if written > state.config.max_upload_bytes {
            drop(file);
            tokio::fs::remove_file(&path).await?;
            return Err(Error::Validation(String::from(
                "photo: file exceeds the maximum upload size",
            )));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;

    Ok(format!("/uploads/{}", filename))
}
