use super::{role, user_role};
use common::normalize;
use sea_orm::entity::prelude::*;

/// A principal of the store, as persisted.
///
/// The row is flat so that it matches the identity tables of existing
/// deployments; in code, prefer [`crate::identity::Principal`], which splits
/// it into profile and credential.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub normalized_email: String,
    #[sea_orm(unique)]
    pub user_name: String,
    #[sea_orm(unique)]
    pub normalized_user_name: String,
    /// Opaque value produced by the password hasher.
    pub password_hash: Option<String>,
    pub lockout_enabled: bool,
    pub email_confirmed: bool,
    pub display_name: String,
    pub birth_date: Date,
    pub security_stamp: Option<String>,
    pub concurrency_stamp: Option<String>,
    pub phone_number: Option<String>,
    #[sea_orm(default_value = "false")]
    pub phone_number_confirmed: bool,
    #[sea_orm(default_value = "false")]
    pub two_factor_enabled: bool,
    /// End of the current lockout window, if any.
    pub lockout_end: Option<DateTimeWithTimeZone>,
    #[sea_orm(default_value = "0")]
    pub access_failed_count: i32,
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

impl Related<role::Entity> for Entity {
    fn to() -> RelationDef {
        user_role::Relation::Role.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Looks a user up by user name, ignoring case.
    pub fn find_by_user_name(user_name: &str) -> Select<Entity> {
        Self::find().filter(Column::NormalizedUserName.eq(normalize(user_name)))
    }
}

impl Model {
    /// Whether this user is linked to the role called `role_name` (case-insensitive).
    pub async fn is_in_role<C: ConnectionTrait>(&self, db: &C, role_name: &str) -> Result<bool, DbErr> {
        let role = self
            .find_related(role::Entity)
            .filter(role::Column::NormalizedName.eq(normalize(role_name)))
            .one(db)
            .await?;
        Ok(role.is_some())
    }

    /// All roles this user is linked to.
    pub async fn roles<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<role::Model>, DbErr> {
        self.find_related(role::Entity).all(db).await
    }
}
