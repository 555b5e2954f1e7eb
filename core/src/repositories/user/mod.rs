//! User repository module

#[path = "trait.rs"]
mod trait_;
mod memory;

pub use memory::InMemoryUserRepository;
pub use trait_::UserRepository;
