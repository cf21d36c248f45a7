//! `SeaORM` Entity for clients table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub rfc: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_assignments_types::Entity")]
    ClientAssignmentsTypes,
    #[sea_orm(has_many = "super::client_accountancy_status::Entity")]
    ClientAccountancyStatus,
}

impl Related<super::client_assignments_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAssignmentsTypes.def()
    }
}

impl Related<super::client_accountancy_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAccountancyStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
