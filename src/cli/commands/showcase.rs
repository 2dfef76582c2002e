use anyhow::Result;
use common::format_brl;
use model::entities::category;
use model::entities::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::config::connect;

/// One featured product as shown on the storefront home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseEntry {
    pub product_id: i32,
    pub category: String,
    pub name: String,
    pub price: String,
    pub photo_path: Option<String>,
}

impl fmt::Display for ShowcaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {} ({})", self.category, self.name, self.price, self.product_id)?;
        if let Some(photo) = &self.photo_path {
            write!(f, " {photo}")?;
        }
        Ok(())
    }
}

/// Featured products with their category, ordered by product id.
pub async fn showcase(database_url: &str) -> Result<Vec<ShowcaseEntry>> {
    let db = connect(database_url).await?;

    let products = Product::find_featured().all(&db).await?;
    debug!("Found {} featured products", products.len());

    let category_names: HashMap<i32, String> = Category::find()
        .filter(category::Column::Id.is_in(products.iter().map(|p| p.category_id)))
        .all(&db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(products
        .into_iter()
        .map(|product| ShowcaseEntry {
            product_id: product.id,
            category: category_names
                .get(&product.category_id)
                .cloned()
                .unwrap_or_default(),
            name: product.name,
            price: format_brl(product.sale_value),
            photo_path: product.photo_path,
        })
        .collect())
}
