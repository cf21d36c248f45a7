//! `SeaORM` Entity for assignment_statuses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assignment_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client_accountancy_assignments::Entity")]
    ClientAccountancyAssignments,
}

impl Related<super::client_accountancy_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAccountancyAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
