//! Resource transformers turning entities into their public JSON shape

pub mod user_resource;

pub use user_resource::{to_view, to_views, UserView};
