//! Gadget entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gadget status, stored as its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum GadgetStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Deployed")]
    Deployed,
    #[sea_orm(string_value = "Destroyed")]
    Destroyed,
    #[sea_orm(string_value = "Decommissioned")]
    Decommissioned,
}

impl Default for GadgetStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Gadget model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gadgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub codename: String,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
