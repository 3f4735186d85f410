use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use midwifery_assistant_domain::entities::MidwifeId;

use crate::entities::common::ErrorResponse;

/// Header set by the authentication proxy in front of the API
pub const MIDWIFE_HEADER: &str = "x-midwife-id";

/// The midwife acting on the request
#[derive(Debug, Clone)]
pub struct CurrentMidwife(pub MidwifeId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentMidwife
where
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(MIDWIFE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CurrentMidwife(MidwifeId::new(value)))
            .ok_or_else(|| {
                warn!("Rejected {} {} without {}", parts.method, parts.uri.path(), MIDWIFE_HEADER);
                ErrorResponse::unauthorized()
            })
    }
}
