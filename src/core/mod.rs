//! Core logic - framework-agnostic pagination, storage and item lookups.
//!
//! Nothing in here talks to Discord; the bot layer renders what these modules
//! produce and translates their errors into messages.

/// Small text and colour helpers shared by the bot layer
pub mod format;
/// Identifier validation and sanitization for dynamic SQL
pub mod identifiers;
/// User inventory helpers on the users database
pub mod inventory;
/// Weapon and special-variant lookups on the items database
pub mod items;
/// Page navigation state machine
pub mod paginator;
/// Database file lifecycle: connect, schema bootstrap, backup and recovery
pub mod store;
