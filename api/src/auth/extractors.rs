use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, Validation, decode};

use crate::auth::claims::{AuthUser, Claims};
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Implements extraction of `AuthUser` from request headers.
///
/// A user already placed in the request extensions by the `allow_authenticated` guard is
/// reused. Otherwise the Bearer token in the `Authorization` header is verified (HS256)
/// against the secret held in `AppState`.
///
/// # Errors
/// - Returns `401 Unauthorized` if the header is missing, malformed, or the token is invalid or expired.
///
/// # Example
/// ```ignore
/// async fn protected_route(user: AuthUser) -> impl IntoResponse {
///     // User is now available
/// }
/// ```
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ApiResponse<Empty>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| unauthorized("Missing or invalid Authorization header"))?;

        let token_data = decode::<Claims>(
            bearer.token(),
            state.decoding_key(),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(token_data.claims))
    }
}

fn unauthorized(msg: &str) -> (StatusCode, Json<ApiResponse<Empty>>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error(StatusCode::UNAUTHORIZED, msg)),
    )
}
