//! Inventory entity - one row per registered user.
//!
//! Only the key is modelled here. Item columns (`gold`, `potions`, ...) are
//! defined by the users schema script and read or written by name through
//! [`crate::core::inventory`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Discord user id of the owner
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
}

/// Inventory has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
