//! Infrastructure Layer
//!
//! Cookie-jar credential storage and the HTTP sign-in gateway.

pub mod cookie_store;
pub mod http_gateway;

pub use cookie_store::CookieCredentialStore;
pub use http_gateway::HttpAuthGateway;
