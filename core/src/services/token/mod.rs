//! Access token issuance and verification

mod service;

pub use service::TokenService;
