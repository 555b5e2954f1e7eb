//! Request schemas and response payloads

pub mod auth;
pub mod user;

pub use auth::{
    AuthPayload, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, VerificationStatus,
    VerifyEmailQuery,
};
pub use user::{IncludeQuery, UpdateUserRequest};
