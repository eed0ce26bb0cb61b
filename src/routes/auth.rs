use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::routes::AppState;

/// Caller identity taken from a verified `Authorization: Bearer` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: Option<String>,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not configured".to_string()))?;

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state.verifier.verify_header(authorization).map_err(|e| {
        tracing::info!("Rejected token on {}: {}", req.path(), e);
        AppError::from(e)
    })?;

    Ok(AuthenticatedUser {
        uid: claims.sub,
        email: claims.email,
    })
}
