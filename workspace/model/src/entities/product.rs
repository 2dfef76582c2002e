use super::category;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

/// A sellable item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    /// What the store paid for one unit.
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub cost_value: Decimal,
    /// Price charged to the customer.
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub sale_value: Decimal,
    /// Units on hand.
    pub quantity: i32,
    /// Shown on the storefront home page ("destaque").
    #[sea_orm(default_value = "false")]
    pub featured: bool,
    /// Public path of the product picture, e.g. `/img/produtos/1.png`.
    pub photo_path: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Featured products, ordered by id.
    pub fn find_featured() -> Select<Entity> {
        Self::find()
            .filter(Column::Featured.eq(true))
            .order_by_asc(Column::Id)
    }
}

impl Model {
    /// Gross margin per unit.
    pub fn margin(&self) -> Decimal {
        self.sale_value - self.cost_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(cost: i64, sale: i64) -> Model {
        Model {
            id: 1,
            category_id: 1,
            name: "iPhone 14 Pro".to_string(),
            description: "Apple A16 Bionic, 128GB".to_string(),
            cost_value: Decimal::new(cost, 2),
            sale_value: Decimal::new(sale, 2),
            quantity: 10,
            featured: true,
            photo_path: Some("/img/produtos/1.png".to_string()),
        }
    }

    #[test]
    fn test_margin() {
        assert_eq!(product(450000, 699900).margin(), Decimal::new(249900, 2));
        assert_eq!(product(1000, 1000).margin(), Decimal::ZERO);
    }
}
