//! Password reset token repository module

#[path = "trait.rs"]
mod trait_;
mod memory;

pub use memory::InMemoryPasswordResetRepository;
pub use trait_::{PasswordResetRecord, PasswordResetRepository};
