use actix_multipart::form::MultipartFormConfig;
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::error::AppError;

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::ParseError(_)
            | AppError::ComputationError(_)
            | AppError::DatabaseError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorBody {
            msg: self.public_message(),
        })
    }
}

/// JSON extractor settings: malformed or missing bodies become a 400 `msg`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::MissingInput(format!("Invalid JSON body: {}", err)).into()
    })
}

/// Multipart extractor settings bounded by the upload limit
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
        .error_handler(|err, _req| {
            AppError::MissingInput(format!("Invalid upload: {}", err)).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MissingInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::AuthError("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::ParseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::ComputationError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_response().status(), status);
        }
    }
}
