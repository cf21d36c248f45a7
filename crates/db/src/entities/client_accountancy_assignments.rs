//! `SeaORM` Entity for client_accountancy_assignments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client_accountancy_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub status_id: i32,
    pub assignment_type_id: i32,
    pub assignment_status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client_accountancy_status::Entity",
        from = "Column::StatusId",
        to = "super::client_accountancy_status::Column::Id",
        on_delete = "Cascade"
    )]
    ClientAccountancyStatus,
    #[sea_orm(
        belongs_to = "super::accountancy_types::Entity",
        from = "Column::AssignmentTypeId",
        to = "super::accountancy_types::Column::Id"
    )]
    AccountancyTypes,
    #[sea_orm(
        belongs_to = "super::assignment_statuses::Entity",
        from = "Column::AssignmentStatusId",
        to = "super::assignment_statuses::Column::Id"
    )]
    AssignmentStatuses,
}

impl Related<super::client_accountancy_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientAccountancyStatus.def()
    }
}

impl Related<super::accountancy_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountancyTypes.def()
    }
}

impl Related<super::assignment_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentStatuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
