use argon2::password_hash::Error as ArError;
use axum::{http::StatusCode, response::IntoResponse};
use jsonwebtoken::errors::Error as JWError;
use surrealdb::Error as SError;

use thiserror::Error;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Argon 2 Error: {0}")]
    Argon2Error(#[from] ArError),

    #[error("Jason web token Error: {0}")]
    JwTError(#[from] JWError),

    #[error("SurrealDb Error: {0}")]
    SurrealError(#[from] SError),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Axum Error: {0}")]
    AxumError(#[from] axum::Error),

    #[error("Validator Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid login detail")]
    InvalidLoginDetails,

    #[error("User with email `{0}` already exists!")]
    EmailExist(String),

    #[error("Not Found")]
    NotFound,

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Forbidden")]
    Unauthorized,

    #[error("Internal Error")]
    Internal,

    // ! Auth
    #[error("Missing authorization token")]
    MissingToken,
    #[error("Invalid authorization token")]
    InvalidToken,
    #[error("Invalid authorization scheme")]
    InvalidScheme,
    #[error("Token expired")]
    TokenExpired,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::Argon2Error(error) => {
                error!("Argon 2 Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::JwTError(error) => {
                error!("JWT Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::SurrealError(error) => {
                error!("Surreal Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::IoError(error) => {
                error!("Io Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::AxumError(error) => {
                error!("Axum Error:{:#?}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::Internal => {
                error!("Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error".to_string(),
                )
            }
            Error::ValidationError(error) => {
                let message = format!("Input validation error: [{}]", error).replace('\n', ", ");
                error!("Validation Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, message)
            }
            Error::AxumJsonRejection(error) => {
                error!("Axum Json Rejection Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Error::InvalidLoginDetails => {
                error!("Invalid login details");
                (StatusCode::BAD_REQUEST, "Invalid Login Details".to_string())
            }
            Error::EmailExist(email) => (
                StatusCode::BAD_REQUEST,
                format!("User with email {} already exists!", email),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            Error::InvalidState(message) => (StatusCode::CONFLICT, message.to_string()),
            Error::Conflict(message) => (StatusCode::CONFLICT, message.to_string()),
            Error::Unauthorized => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            Error::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
            ),
            Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization token".to_string(),
            ),
            Error::InvalidScheme => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization scheme".to_string(),
            ),
            Error::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
        };
        (status, message).into_response()
    }
}
