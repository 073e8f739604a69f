//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `WalkState`: the state machine a single traversal run moves through

mod walk_state;

// Re-export main types
pub use walk_state::WalkState;
