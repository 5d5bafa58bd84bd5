//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod group;
pub mod review;

// Re-export repositories
pub use group::GroupRepository;
pub use review::ReviewRepository;
