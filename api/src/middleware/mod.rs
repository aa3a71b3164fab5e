mod auth;

pub use auth::{authenticate_jwt, decode_claims, ensure_admin};
