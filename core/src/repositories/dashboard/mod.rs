//! Dashboard aggregate repository module

#[path = "trait.rs"]
mod trait_;
mod memory;

pub use memory::{CatalogueCounts, InMemoryDashboardRepository};
pub use trait_::DashboardRepository;
