/// Bearer token verification and role gating
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// JSON body extraction with field validation
pub mod validation;
