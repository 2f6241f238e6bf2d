use sea_orm::DatabaseConnection;

use crate::server::service::auth::token::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub token_verifier: TokenVerifier,
    /// Largest attachment accepted, in bytes
    pub max_attachment_size: i64,
}
