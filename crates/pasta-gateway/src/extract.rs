use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pasta_core::Identity;
use std::convert::Infallible;

/// The identity asserted by the upstream proxy, if any.
///
/// A missing, blank or non-UTF-8 header yields `CurrentUser(None)`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get(state.identity_header())
            .and_then(|value| value.to_str().ok())
            .and_then(Identity::new);
        Ok(Self(identity))
    }
}
