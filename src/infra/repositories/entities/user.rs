//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC hash
    pub password: String,
    pub user_type_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_type::Entity",
        from = "Column::UserTypeId",
        to = "super::user_type::Column::Id",
        on_delete = "SetNull"
    )]
    UserType,
    #[sea_orm(has_many = "super::user_location::Entity")]
    UserLocation,
}

impl Related<super::user_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserType.def()
    }
}

impl Related<super::user_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLocation.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_location::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_location::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            username: model.username,
            email: model.email,
            password_hash: model.password,
            user_type_id: model.user_type_id,
        }
    }
}
