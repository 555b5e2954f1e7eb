//! Response building and error mapping shared by every route

pub mod error;
pub mod response;

pub use error::{ApiError, ExceptionMapper, ExceptionMapping, FailureCategory};
