//! `SeaORM` Entity for client_assignments_types table.
//!
//! One row per assignment type a client currently tracks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client_assignments_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub client_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub assignment_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::accountancy_types::Entity",
        from = "Column::AssignmentTypeId",
        to = "super::accountancy_types::Column::Id"
    )]
    AccountancyTypes,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::accountancy_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountancyTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
