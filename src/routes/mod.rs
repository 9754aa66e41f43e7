use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod products;
pub mod tags;
pub mod variations;

/// JSON body returned alongside client errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Maps a service failure to its HTTP response, logging backend failures.
pub(crate) fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorResponse::new(message)),
        err @ ServiceError::DuplicateName(_) => {
            HttpResponse::Conflict().json(ErrorResponse::new(err.to_string()))
        }
        err @ ServiceError::InvalidTarget(_) => {
            HttpResponse::UnprocessableEntity().json(ErrorResponse::new(err.to_string()))
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err @ ServiceError::Transport(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
