//! Entity module - SeaORM entity definitions for the users database.
//! Item tables are addressed dynamically and have no entity.

pub mod inventory;

pub use inventory::Entity as Inventory;
