//! Caller identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;

use crate::error::ApiError;

/// Header carrying the principal a request acts as.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// The principal issuing the current request, taken from `X-Principal`.
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .ok_or_else(|| DomainError::InvalidPrincipal("missing X-Principal header".to_owned()))?
            .to_str()
            .map_err(|_| DomainError::InvalidPrincipal("X-Principal is not visible ASCII".to_owned()))?;

        Ok(Self(Principal::parse(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<Caller, ApiError> {
        let (mut parts, ()) = request.into_parts();
        Caller::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_principal_from_header() {
        let request = Request::builder()
            .header("X-Principal", "wallet_1")
            .body(())
            .unwrap();

        let Caller(principal) = extract(request).await.unwrap();

        assert_eq!(principal.as_str(), "wallet_1");
    }

    #[tokio::test]
    async fn test_missing_header_is_invalid_principal() {
        let request = Request::builder().body(()).unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError(DomainError::InvalidPrincipal(_)))));
    }

    #[tokio::test]
    async fn test_malformed_header_is_invalid_principal() {
        let request = Request::builder()
            .header("X-Principal", "wallet 1")
            .body(())
            .unwrap();

        let result = extract(request).await;

        assert!(matches!(result, Err(ApiError(DomainError::InvalidPrincipal(_)))));
    }
}
