use std::{
    env::VarError,
    io::Error as IO_ERROR,
    num::{ParseIntError, TryFromIntError as TRY_FROM_INT_ERROR},
    str::ParseBoolError as PARSE_BOOL_ERROR,
    string::FromUtf8Error as FROM_UTF8_ERROR,
};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Error as ANYHOW_ERROR;
use bcrypt::BcryptError as BCRYPT_ERROR;
use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use csv::Error as CSV_ERROR;
use serde_json::Error as JSON_ERROR;
use sqlx::error::Error as SQL_ERROR;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    SQL(#[from] SQL_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    CsvError(#[from] CSV_ERROR),

    #[error("{0}")]
    BcryptError(#[from] BCRYPT_ERROR),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("{0}")]
    TryFromIntError(#[from] TRY_FROM_INT_ERROR),

    #[error("{0}")]
    FromUtf8Error(#[from] FROM_UTF8_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Task error: {0}")]
    TaskError(String),

    #[error("Parse message error: {0}")]
    ParseMessage(String),

    #[error("Decode datetime: {0}")]
    DecodeDateTimeError(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing params: {0}")]
    MissingParams(String),

    #[error("Invalid option {option}")]
    InvalidOption { option: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Wrapper around the core Error that implements actix_web::ResponseError.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError(Error::from(e))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError(Error::from(e))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError(Error::from(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError(Error::from(e))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(e: bcrypt::BcryptError) -> Self {
        ApiError(Error::from(e))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            // 400 Bad Request - client sent invalid input
            Error::Validation(_)
            | Error::MissingParams(_)
            | Error::InvalidOption { .. }
            | Error::ParseMessage(_)
            | Error::DecodeDateTimeError(_)
            | Error::ParseBoolError(_)
            | Error::INT(_)
            | Error::BigDecimalError(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized - missing or bad credentials
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 404 Not Found - requested resource does not exist
            Error::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict - uniqueness or overlap violations
            Error::Conflict(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error - everything else
            Error::Io(_)
            | Error::SQL(_)
            | Error::VAR(_)
            | Error::TokioJoinError(_)
            | Error::JsonError(_)
            | Error::CsvError(_)
            | Error::BcryptError(_)
            | Error::TryFromIntError(_)
            | Error::FromUtf8Error(_)
            | Error::AnyHowError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::ConfigurationError(_)
            | Error::ServerError(_)
            | Error::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }

        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.0.to_string(),
            "status": status.as_u16(),
        });
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let cases = [
            (
                ApiError(Error::Validation(String::from("name: too short"))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError(Error::Unauthorized(String::from("bad token"))),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError(Error::NotFound(String::from("lease 9"))),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError(Error::Conflict(String::from("overlapping lease"))),
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected);
        }
    }

    #[test]
    fn test_unexpected_errors_map_to_500() {
        let err = ApiError(Error::ServerError(String::from("boom")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
