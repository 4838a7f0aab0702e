//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Owner-only database maintenance
pub mod admin;

/// General utility commands
pub mod general;

/// Player inventory commands
pub mod inventory;

/// Weapon lookup commands
pub mod items;

// Export commands
pub use admin::*;
pub use general::*;
pub use inventory::*;
pub use items::*;
