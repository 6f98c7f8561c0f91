//! Content store implementations - in-memory with sample content.

mod memory;
mod seed;

pub use memory::InMemoryContentStore;
pub use seed::sample_posts;
