//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{ChurchSummary, MemberSummary, User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub role: String,
    pub is_admin: bool,
    pub is_leader: bool,
    pub church_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::church::Entity",
        from = "Column::ChurchId",
        to = "super::church::Column::Id"
    )]
    Church,
}

impl Related<super::church::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Church.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert a user row (with its optional church row) to the domain entity
impl From<(Model, Option<super::church::Model>)> for User {
    fn from((model, church): (Model, Option<super::church::Model>)) -> Self {
        User {
            id: model.id,
            email: model.email,
            name: model.name,
            password_hash: model.password_hash,
            image: model.image,
            role: UserRole::from(model.role.as_str()),
            is_admin: model.is_admin,
            is_leader: model.is_leader,
            church_id: model.church_id,
            church: church.map(ChurchSummary::from),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Model> for MemberSummary {
    fn from(model: Model) -> Self {
        MemberSummary {
            id: model.id,
            name: model.name,
            email: model.email,
            role: UserRole::from(model.role.as_str()),
        }
    }
}
