//! Session token extraction middleware.
//!
//! Clients authenticate by sending their session token in the
//! `X-Token` header. These extractors only pull the raw token out of
//! the request; resolving it to a user happens in the handlers, which
//! hold the stores.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::web::error::ApiError;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "X-Token";

/// Extractor for the session token of an authenticated request.
///
/// Rejects with 401 when the header is absent. A present-but-invalid
/// token is rejected later, when the handler resolves it.
#[derive(Debug, Clone)]
pub struct XToken(pub String);

impl<S> FromRequestParts<S> for XToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .filter(|t| !t.is_empty())
                .ok_or_else(ApiError::unauthorized)?;

            Ok(XToken(token.to_string()))
        })
    }
}

/// Optional session token extractor.
///
/// For endpoints that serve both authenticated and anonymous callers;
/// a missing or malformed header yields no token instead of a 401.
#[derive(Debug, Clone)]
pub struct OptionalXToken(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalXToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string());

            Ok(OptionalXToken(token))
        })
    }
}
