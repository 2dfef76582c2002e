use super::product;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

/// A product grouping shown in the storefront menu.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A category groups many products.
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Gets the products of this category, ordered by id.
    pub async fn products<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<product::Model>, DbErr> {
        self.find_related(product::Entity)
            .order_by_asc(product::Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::SqliteQueryBuilder;
    use sea_orm::{Database, DbBackend, Schema, Set, Statement};
    use rust_decimal::Decimal;

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        // Create the categories and products tables
        let schema = Schema::new(DbBackend::Sqlite);
        for stmt in [
            schema.create_table_from_entity(Entity),
            schema.create_table_from_entity(product::Entity),
        ] {
            let statement =
                Statement::from_string(DbBackend::Sqlite, stmt.to_string(SqliteQueryBuilder));
            db.execute(statement).await.unwrap();
        }

        db
    }

    async fn create_test_category(db: &DatabaseConnection, id: i32, name: &str) -> Model {
        let category = ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
        };

        category.insert(db).await.unwrap()
    }

    async fn create_test_product(db: &DatabaseConnection, id: i32, category_id: i32, name: &str) {
        product::ActiveModel {
            id: Set(id),
            category_id: Set(category_id),
            name: Set(name.to_string()),
            description: Set(String::new()),
            cost_value: Set(Decimal::new(10000, 2)),
            sale_value: Set(Decimal::new(15000, 2)),
            quantity: Set(1),
            featured: Set(false),
            photo_path: Set(None),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_products_of_category() {
        let db = setup_test_db().await;

        let consoles = create_test_category(&db, 7, "Consoles").await;
        let drones = create_test_category(&db, 9, "Drones").await;

        create_test_product(&db, 32, 7, "Xbox Series X").await;
        create_test_product(&db, 31, 7, "PlayStation 5").await;
        create_test_product(&db, 41, 9, "DJI Mini 3 Pro").await;

        let products = consoles.products(&db).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 31);
        assert_eq!(products[1].id, 32);

        let products = drones.products(&db).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "DJI Mini 3 Pro");
    }

    #[tokio::test]
    async fn test_empty_category() {
        let db = setup_test_db().await;

        let category = create_test_category(&db, 1, "Smartphones").await;

        assert!(category.products(&db).await.unwrap().is_empty());
    }
}
