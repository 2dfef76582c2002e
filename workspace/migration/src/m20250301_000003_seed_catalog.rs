use crate::seed::{seed_catalog, SeedSet};
use common::Argon2Hasher;
use model::entities::{category, product, role, user, user_role};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, TransactionTrait};
use sea_orm_migration::prelude::*;
use tracing::{error, info};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let seed = SeedSet::load()?;

        // The migrator only opens a transaction on Postgres
        let txn = manager.get_connection().begin().await?;
        let report = match seed_catalog(&txn, &seed, &Argon2Hasher::new()).await {
            Ok(report) => report,
            Err(e) => {
                error!("Seed migration failed, rolling back: {}", e);
                txn.rollback().await?;
                return Err(e.into());
            }
        };
        txn.commit().await?;
        info!("Seed migration applied: {}", report);

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let seed = SeedSet::load()?;
        let db = manager.get_connection();

        // Remove only the seeded keys, dependents first
        product::Entity::delete_many()
            .filter(product::Column::Id.is_in(seed.products.iter().map(|p| p.id)))
            .exec(db)
            .await?;

        category::Entity::delete_many()
            .filter(category::Column::Id.is_in(seed.categories.iter().map(|c| c.id)))
            .exec(db)
            .await?;

        if !seed.user_roles.is_empty() {
            let mut links = Condition::any();
            for link in &seed.user_roles {
                links = links.add(
                    Condition::all()
                        .add(user_role::Column::UserId.eq(link.user_id.as_str()))
                        .add(user_role::Column::RoleId.eq(link.role_id.as_str())),
                );
            }
            user_role::Entity::delete_many().filter(links).exec(db).await?;
        }

        user::Entity::delete_many()
            .filter(user::Column::Id.is_in(seed.users.iter().map(|u| u.id.clone())))
            .exec(db)
            .await?;

        role::Entity::delete_many()
            .filter(role::Column::Id.is_in(seed.roles.iter().map(|r| r.id.clone())))
            .exec(db)
            .await?;

        Ok(())
    }
}
