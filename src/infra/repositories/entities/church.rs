//! Church database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Church, ChurchSummary};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "churches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Church {
    fn from(model: Model) -> Self {
        Church {
            id: model.id,
            name: model.name,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Model> for ChurchSummary {
    fn from(model: Model) -> Self {
        ChurchSummary {
            id: model.id,
            name: model.name,
        }
    }
}
