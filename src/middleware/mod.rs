pub mod admin;
pub mod auth;
pub mod security_headers;

pub use admin::AdminGate;
pub use auth::TokenVerifier;
pub use security_headers::SecurityHeaders;
