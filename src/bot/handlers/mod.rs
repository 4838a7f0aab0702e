//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that are not
//! commands themselves: button presses, error reporting and presence updates.

/// Autocomplete handlers for weapon names
pub mod autocomplete;
/// Command error boundary
pub mod errors;
/// Hosts a [`crate::core::paginator::Paginator`] on a Discord message
pub mod paginator;
/// Rotating presence status
pub mod presence;
