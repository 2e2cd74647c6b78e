pub mod auth;
pub mod error;
pub mod policy;
pub mod validation;

pub use error::CoreError;

use ballot_db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub registration_enabled: bool,
    /// The public URL of this server (e.g., https://polls.example.com).
    /// Used only for logging; resource URLs in responses are path-absolute.
    pub public_url: Option<String>,
}
