//! `SeaORM` Entity for client_accountancy_status table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client_accountancy_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: Uuid,
    pub month: Date,
    pub due_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub observations: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_many = "super::client_accountancy_assignments::Entity")]
    ClientAccountancyAssignments,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::client_accountancy_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAccountancyAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
