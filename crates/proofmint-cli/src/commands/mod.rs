//! CLI command implementations

pub mod admin;
pub mod cert_type;
pub mod client;
pub mod credential;
pub mod hash;
pub mod issuer;
pub mod server;
pub mod status;
