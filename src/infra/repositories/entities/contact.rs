//! Contact database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Contact;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Digit string, never an integer column
    pub phone: String,
    pub email: String,
    pub owner_user_id: String,
    pub version: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Contact {
    fn from(model: Model) -> Self {
        Contact {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            owner_user_id: model.owner_user_id,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
