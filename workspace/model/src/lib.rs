pub mod entities;
pub mod identity;

// Re-export tracing for use in this crate
pub use tracing;

/// Installs the process-wide tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
#[cfg(not(test))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    };

    use super::*;
    use entities::*;
    use entities::prelude::*;

    const USER_ID: &str = "ddf093a6-6cb5-4ff7-9a64-83da34aee005";

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Schema and seed data
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_seeded_relations() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // User to roles through user_roles
        let gallo = User::find_by_user_name("gallojunior").one(&db).await?.unwrap();
        assert_eq!(gallo.id, USER_ID);
        let roles = gallo.roles(&db).await?;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "Administrador");

        // Role back to users
        let admins = roles[0].find_related(User).all(&db).await?;
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].user_name, "GalloJunior");

        let plain_role = Role::find()
            .filter(role::Column::NormalizedName.eq("USUÁRIO"))
            .one(&db)
            .await?
            .unwrap();
        assert!(plain_role.find_related(User).all(&db).await?.is_empty());

        // Category to products
        let drones = Category::find_by_id(9).one(&db).await?.unwrap();
        let products = drones.products(&db).await?;
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "DJI Mini 3 Pro");
        assert!(products[0].featured);
        assert!(products[1..].iter().all(|p| !p.featured && p.photo_path.is_none()));

        // Product back to category
        let tello = Product::find_by_id(44).one(&db).await?.unwrap();
        let category = tello.find_related(Category).one(&db).await?.unwrap();
        assert_eq!(category.name, "Drones");
        assert_eq!(tello.margin(), Decimal::new(39900, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_management_after_seed() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // New rows get keys after the seeded ones
        let tablets = category::ActiveModel {
            name: Set("Tablets".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        assert_eq!(tablets.id, 11);

        let ipad = product::ActiveModel {
            category_id: Set(tablets.id),
            name: Set("iPad Air".to_string()),
            description: Set("M1, 64GB".to_string()),
            cost_value: Set(Decimal::new(350000, 2)),
            sale_value: Set(Decimal::new(549900, 2)),
            quantity: Set(9),
            featured: Set(false),
            photo_path: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        assert_eq!(ipad.id, 51);

        // Price and stock updates
        let mut active: product::ActiveModel = ipad.into();
        active.sale_value = Set(Decimal::new(499900, 2));
        active.quantity = Set(8);
        active.featured = Set(true);
        let ipad = active.update(&db).await?;
        assert_eq!(ipad.sale_value, Decimal::new(499900, 2));

        let featured = Product::find_featured().all(&db).await?;
        assert_eq!(featured.len(), 11);
        assert_eq!(featured.last().map(|p| p.id), Some(51));

        // Deleting a category takes its products with it
        tablets.delete(&db).await?;
        assert_eq!(Product::find().count(&db).await?, 50);

        Ok(())
    }

    #[tokio::test]
    async fn test_product_requires_existing_category() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let result = product::ActiveModel {
            category_id: Set(99),
            name: Set("Orphan".to_string()),
            description: Set(String::new()),
            cost_value: Set(Decimal::ONE),
            sale_value: Set(Decimal::TWO),
            quantity: Set(0),
            featured: Set(false),
            photo_path: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_user_name_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let existing = User::find_by_id(USER_ID).one(&db).await?.unwrap();
        let mut duplicate = identity::Principal::from(existing);
        duplicate.profile.id = "another-id".to_string();

        let result = duplicate.into_active_model().insert(&db).await;
        assert!(result.is_err());
        assert_eq!(User::find().count(&db).await?, 1);

        Ok(())
    }
}
