//! Authentication route handlers
//!
//! This module contains the account lifecycle endpoints:
//! - Registration and login
//! - Password reset
//! - Email verification
//! - The current user

pub mod email;
pub mod login;
pub mod me;
pub mod password;
pub mod register;
