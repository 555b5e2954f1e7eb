//! Storage module - public URLs for files kept on the public disk

mod public;

pub use public::PublicStorage;
