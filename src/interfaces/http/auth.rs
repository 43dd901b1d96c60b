use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::domain::error::AppError;
use crate::interfaces::http::HttpState;

/// Caller resolved from an `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::Internal("HTTP state is not configured".to_string()))?;
            let token = token?;
            let username = state.auth_use_case.authenticate(&token).await?;
            Ok(AuthenticatedUser { username })
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::AuthError("Missing Authorization Header".to_string()))?
        .to_str()
        .map_err(|_| AppError::AuthError("Malformed Authorization Header".to_string()))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::AuthError(
            "Missing 'Bearer' type in 'Authorization' header".to_string(),
        )),
    }
}
