//! Typed seed records and the embedded seed files.
//!
//! The rows live in `seed/*.json` next to this crate so data changes can be
//! reviewed apart from the code that writes them. They are compiled into the
//! binary; nothing is read from disk at runtime.

use super::SeedError;
use chrono::NaiveDate;
use common::normalize;
use model::entities::{category, product, role, user_role};
use model::identity::{AuthCredential, Principal, UserProfile};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

const ROLES_JSON: &str = include_str!("../../seed/roles.json");
const USERS_JSON: &str = include_str!("../../seed/users.json");
const USER_ROLES_JSON: &str = include_str!("../../seed/user_roles.json");
const CATEGORIES_JSON: &str = include_str!("../../seed/categories.json");
const PRODUCTS_JSON: &str = include_str!("../../seed/products.json");

/// Money columns hold at most this many fractional digits.
pub const MONEY_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleSeed {
    pub id: String,
    pub name: String,
}

impl RoleSeed {
    pub fn to_model(&self) -> role::Model {
        role::Model {
            id: self.id.clone(),
            name: self.name.clone(),
            normalized_name: normalize(&self.name),
            concurrency_stamp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSeed {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub display_name: String,
    pub birth_date: NaiveDate,
    /// Plaintext handed to the hasher; never stored.
    pub password: String,
    pub lockout_enabled: bool,
    pub email_confirmed: bool,
}

impl UserSeed {
    pub fn principal(&self, password_hash: Option<String>) -> Principal {
        Principal::new(
            UserProfile {
                id: self.id.clone(),
                email: self.email.clone(),
                user_name: self.user_name.clone(),
                display_name: self.display_name.clone(),
                birth_date: self.birth_date,
            },
            AuthCredential {
                password_hash,
                lockout_enabled: self.lockout_enabled,
                email_confirmed: self.email_confirmed,
                ..Default::default()
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRoleSeed {
    pub user_id: String,
    pub role_id: String,
}

impl UserRoleSeed {
    pub fn to_model(&self) -> user_role::Model {
        user_role::Model {
            user_id: self.user_id.clone(),
            role_id: self.role_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySeed {
    pub id: i32,
    pub name: String,
}

impl CategorySeed {
    pub fn to_model(&self) -> category::Model {
        category::Model {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductSeed {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub cost_value: Decimal,
    pub sale_value: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub photo_path: Option<String>,
}

impl ProductSeed {
    pub fn to_model(&self) -> product::Model {
        product::Model {
            id: self.id,
            category_id: self.category_id,
            name: self.name.clone(),
            description: self.description.clone(),
            cost_value: self.cost_value,
            sale_value: self.sale_value,
            quantity: self.quantity,
            featured: self.featured,
            photo_path: self.photo_path.clone(),
        }
    }
}

/// The complete set of rows written at schema-creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSet {
    pub roles: Vec<RoleSeed>,
    pub users: Vec<UserSeed>,
    pub user_roles: Vec<UserRoleSeed>,
    pub categories: Vec<CategorySeed>,
    pub products: Vec<ProductSeed>,
}

fn parse<T: for<'de> Deserialize<'de>>(file: &'static str, contents: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(contents).map_err(|source| SeedError::Data { file, source })
}

impl SeedSet {
    /// Parses the embedded seed files.
    pub fn load() -> Result<Self, SeedError> {
        Ok(Self {
            roles: parse("roles.json", ROLES_JSON)?,
            users: parse("users.json", USERS_JSON)?,
            user_roles: parse("user_roles.json", USER_ROLES_JSON)?,
            categories: parse("categories.json", CATEGORIES_JSON)?,
            products: parse("products.json", PRODUCTS_JSON)?,
        })
    }

    /// Checks keys, references and value ranges before anything is written.
    pub fn validate(&self) -> Result<(), SeedError> {
        let role_ids = unique_keys("roles", self.roles.iter().map(|r| r.id.clone()))?;
        unique_keys("roles", self.roles.iter().map(|r| normalize(&r.name)))?;
        let user_ids = unique_keys("users", self.users.iter().map(|u| u.id.clone()))?;
        unique_keys("users", self.users.iter().map(|u| normalize(&u.user_name)))?;
        unique_keys(
            "user_roles",
            self.user_roles.iter().map(|ur| format!("({}, {})", ur.user_id, ur.role_id)),
        )?;
        let category_ids = unique_keys("categories", self.categories.iter().map(|c| c.id))?;
        unique_keys("categories", self.categories.iter().map(|c| c.name.clone()))?;
        unique_keys("products", self.products.iter().map(|p| p.id))?;

        for role in &self.roles {
            require_name("roles", &role.id, &role.name)?;
        }
        for user in &self.users {
            require_name("users", &user.id, &user.user_name)?;
            require_name("users", &user.id, &user.email)?;
        }
        for link in &self.user_roles {
            if !user_ids.contains(&link.user_id) {
                return Err(SeedError::Invalid(format!(
                    "user role references unknown user {}",
                    link.user_id
                )));
            }
            if !role_ids.contains(&link.role_id) {
                return Err(SeedError::Invalid(format!(
                    "user role references unknown role {}",
                    link.role_id
                )));
            }
        }
        for category in &self.categories {
            require_name("categories", &category.id, &category.name)?;
        }
        for product in &self.products {
            require_name("products", &product.id, &product.name)?;
            if !category_ids.contains(&product.category_id) {
                return Err(SeedError::Invalid(format!(
                    "product {} references unknown category {}",
                    product.id, product.category_id
                )));
            }
            check_money(product.id, "cost_value", product.cost_value)?;
            check_money(product.id, "sale_value", product.sale_value)?;
            if product.quantity < 0 {
                return Err(SeedError::Invalid(format!(
                    "product {} has negative quantity {}",
                    product.id, product.quantity
                )));
            }
        }

        Ok(())
    }
}

fn unique_keys<K>(table: &str, keys: impl Iterator<Item = K>) -> Result<HashSet<K>, SeedError>
where
    K: Eq + std::hash::Hash + std::fmt::Display + Clone,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(SeedError::Invalid(format!("duplicate key {key} in {table}")));
        }
    }
    Ok(seen)
}

fn require_name(table: &str, key: &dyn std::fmt::Display, name: &str) -> Result<(), SeedError> {
    if name.trim().is_empty() {
        return Err(SeedError::Invalid(format!("empty name for {key} in {table}")));
    }
    Ok(())
}

fn check_money(product_id: i32, column: &str, value: Decimal) -> Result<(), SeedError> {
    if value.is_sign_negative() {
        return Err(SeedError::Invalid(format!(
            "product {product_id} has negative {column} {value}"
        )));
    }
    if value.scale() > MONEY_SCALE {
        return Err(SeedError::Invalid(format!(
            "product {product_id} has {column} {value} with more than {MONEY_SCALE} decimal places"
        )));
    }
    Ok(())
}
