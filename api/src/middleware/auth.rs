use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use common::models::UserClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Authentication middleware that decodes an optional bearer token
///
/// A valid token puts its claims in the request extensions. A missing or
/// invalid token leaves the request anonymous; routes that need a user
/// reject it further in.
#[tracing::instrument(skip(state, req, next))]
pub async fn authenticate_jwt(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match decode_claims(token, &state.config.auth.jwt_secret) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
            }
        }
    }

    next.run(req).await
}

/// Reject the request unless an admin token was presented
#[tracing::instrument(skip(req, next))]
pub async fn ensure_admin(req: Request, next: Next) -> Result<Response, ErrorResponse> {
    match req.extensions().get::<UserClaims>() {
        Some(claims) if claims.is_admin => {
            tracing::info!(
                username = %claims.username,
                method = %req.method(),
                path = %req.uri().path(),
                "Admin operation"
            );
            Ok(next.run(req).await)
        }
        Some(claims) => {
            tracing::warn!(username = %claims.username, "User lacks admin rights");
            Err(ErrorResponse::unauthorized())
        }
        None => Err(ErrorResponse::unauthorized()),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validate an HS256 token signed with `secret` and return its claims
pub fn decode_claims(token: &str, secret: &str) -> Result<UserClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, exp: i64) -> String {
        let claims = UserClaims {
            username: "admin".to_string(),
            is_admin: true,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn test_decode_claims_round_trip() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let claims = decode_claims(&token("secret", exp), "secret").unwrap();
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_decode_claims_rejects_wrong_secret() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        assert!(decode_claims(&token("secret", exp), "other").is_err());
    }

    #[test]
    fn test_decode_claims_rejects_expired_token() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        assert!(decode_claims(&token("secret", exp), "secret").is_err());
    }
}
