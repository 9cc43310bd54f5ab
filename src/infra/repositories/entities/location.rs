//! Location database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Location;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_location::Entity")]
    UserLocation,
}

impl Related<super::user_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLocation.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_location::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_location::Relation::Location.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Location {
    fn from(model: Model) -> Self {
        Location {
            id: model.id,
            name: model.name,
            address: model.address,
        }
    }
}
