use super::{user, user_role};
use sea_orm::entity::prelude::*;

/// An authorization role, e.g. "Administrador".
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    /// Uppercase projection of `name`, used for lookups.
    #[sea_orm(unique)]
    pub normalized_name: String,
    pub concurrency_stamp: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        user_role::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_role::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
