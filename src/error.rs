use actix_web::HttpResponse;
use thiserror::Error;

/// Failure taxonomy for the admin API.
///
/// `NotFound` and `Validation` are caller mistakes; `InvalidMediaType` and
/// `PayloadTooLarge` reject an upload before anything is written; `Database`
/// and `Storage` are server-side faults. Best-effort image deletions never
/// surface here — they are logged and absorbed at the call site.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("invalid file type: {0}. Allowed types: jpg, jpeg, png, gif")]
    InvalidMediaType(String),
    #[error("file too large: {0} bytes (limit 16 MiB)")]
    PayloadTooLarge(usize),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// Map the error to the JSON response shape the handlers return.
    pub fn response(&self) -> HttpResponse {
        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            ApiError::NotFound(_) => HttpResponse::NotFound().json(body),
            ApiError::Validation(_) => HttpResponse::BadRequest().json(body),
            ApiError::InvalidMediaType(_) => HttpResponse::UnsupportedMediaType().json(body),
            ApiError::PayloadTooLarge(_) => HttpResponse::PayloadTooLarge().json(body),
            ApiError::Database(_) | ApiError::Storage(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}
