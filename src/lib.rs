// Re-export internals for use under bop_server crate namespace
// Mainly for use in tests
pub mod apidocs;
pub mod auth;
pub mod crypto;
pub mod db;
pub mod error;
pub mod options;
pub mod security;
pub mod valves;

/// Registers extractor configuration and every route of the api.
pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    error::configure_extractors(cfg);
    auth::routes::configure_app(cfg);
    valves::routes::configure_app(cfg);
}
