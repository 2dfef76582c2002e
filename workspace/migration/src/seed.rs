//! Seeding routine for the catalog store.
//!
//! Writes roles, users, user roles, categories and products, in that order,
//! using the fixed keys of the [`SeedSet`]. A row whose key already exists is
//! skipped when it carries the seeded values and rejected with
//! [`SeedError::Conflict`] when it does not, so running the routine again
//! against a seeded store changes nothing.

mod data;
mod error;

pub use data::{CategorySeed, ProductSeed, RoleSeed, SeedSet, UserRoleSeed, UserSeed, MONEY_SCALE};
pub use error::SeedError;

use common::CredentialHasher;
use model::entities::{category, product, role, user, user_role};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityName, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, info, trace};

/// Rows written and rows left alone for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableReport {
    pub inserted: u64,
    pub skipped: u64,
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} inserted, {} skipped", self.inserted, self.skipped)
    }
}

/// Outcome of [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles: TableReport,
    pub users: TableReport,
    pub user_roles: TableReport,
    pub categories: TableReport,
    pub products: TableReport,
}

impl SeedReport {
    pub fn inserted(&self) -> u64 {
        self.tables().iter().map(|(_, t)| t.inserted).sum()
    }

    pub fn skipped(&self) -> u64 {
        self.tables().iter().map(|(_, t)| t.skipped).sum()
    }

    fn tables(&self) -> [(&'static str, TableReport); 5] {
        [
            ("roles", self.roles),
            ("users", self.users),
            ("user_roles", self.user_roles),
            ("categories", self.categories),
            ("products", self.products),
        ]
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .tables()
            .iter()
            .map(|(name, table)| format!("{name}: {table}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Runs every seeding step in dependency order.
///
/// The seed set is validated first; nothing is written if it is broken. The
/// routine does not open a transaction of its own: pass a
/// `DatabaseTransaction` to get all-or-nothing behaviour.
pub async fn seed_catalog<C: ConnectionTrait>(
    db: &C,
    seed: &SeedSet,
    hasher: &dyn CredentialHasher,
) -> Result<SeedReport, SeedError> {
    trace!("Entering seed_catalog function");
    seed.validate()?;
    debug!("Seed set validated");

    let report = SeedReport {
        roles: seed_roles(db, &seed.roles).await?,
        users: seed_users(db, &seed.users, hasher).await?,
        user_roles: seed_user_roles(db, &seed.user_roles).await?,
        categories: seed_categories(db, &seed.categories).await?,
        products: seed_products(db, &seed.products).await?,
    };

    realign_sequences(db).await?;

    info!("Catalog seed finished ({})", report);
    Ok(report)
}

pub async fn seed_roles<C: ConnectionTrait>(db: &C, roles: &[RoleSeed]) -> Result<TableReport, SeedError> {
    let existing = role::Entity::find()
        .filter(role::Column::Id.is_in(roles.iter().map(|r| r.id.clone())))
        .all(db)
        .await?;

    let wanted = roles.iter().map(RoleSeed::to_model).collect();
    let (missing, skipped) = plan("roles", wanted, existing, |r| r.id.clone(), |seeded, row| {
        seeded.name == row.name && seeded.normalized_name == row.normalized_name
    })?;

    let inserted = insert_active(db, missing.into_iter().map(role::ActiveModel::from).collect()).await?;
    debug!("Seeded roles: {} inserted, {} skipped", inserted, skipped);
    Ok(TableReport { inserted, skipped })
}

/// Seeds users, hashing the seed password of each user that is not stored yet.
///
/// An existing seeded user keeps its stored hash.
pub async fn seed_users<C: ConnectionTrait>(
    db: &C,
    users: &[UserSeed],
    hasher: &dyn CredentialHasher,
) -> Result<TableReport, SeedError> {
    let existing: HashMap<String, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(users.iter().map(|u| u.id.clone())))
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.id.clone(), row))
        .collect();

    let mut missing = Vec::new();
    let mut skipped = 0;
    for seed in users {
        match existing.get(&seed.id) {
            Some(row) if seed.principal(None).matches_row(row) => {
                trace!("User {} already seeded", seed.id);
                skipped += 1;
            }
            Some(_) => {
                return Err(SeedError::Conflict {
                    table: "users",
                    key: seed.id.clone(),
                });
            }
            None => {
                let hash = hasher.hash(&seed.user_name, &seed.password)?;
                missing.push(seed.principal(Some(hash)).into_active_model());
            }
        }
    }

    let inserted = insert_active(db, missing).await?;
    debug!("Seeded users: {} inserted, {} skipped", inserted, skipped);
    Ok(TableReport { inserted, skipped })
}

pub async fn seed_user_roles<C: ConnectionTrait>(
    db: &C,
    links: &[UserRoleSeed],
) -> Result<TableReport, SeedError> {
    if links.is_empty() {
        return Ok(TableReport::default());
    }

    let mut condition = Condition::any();
    for link in links {
        condition = condition.add(
            Condition::all()
                .add(user_role::Column::UserId.eq(link.user_id.as_str()))
                .add(user_role::Column::RoleId.eq(link.role_id.as_str())),
        );
    }
    let existing = user_role::Entity::find().filter(condition).all(db).await?;

    let wanted = links.iter().map(UserRoleSeed::to_model).collect();
    let (missing, skipped) = plan(
        "user_roles",
        wanted,
        existing,
        |link| (link.user_id.clone(), link.role_id.clone()),
        |seeded, row| seeded == row,
    )?;

    let inserted =
        insert_active(db, missing.into_iter().map(user_role::ActiveModel::from).collect()).await?;
    debug!("Seeded user roles: {} inserted, {} skipped", inserted, skipped);
    Ok(TableReport { inserted, skipped })
}

pub async fn seed_categories<C: ConnectionTrait>(
    db: &C,
    categories: &[CategorySeed],
) -> Result<TableReport, SeedError> {
    let existing = category::Entity::find()
        .filter(category::Column::Id.is_in(categories.iter().map(|c| c.id)))
        .all(db)
        .await?;

    let wanted = categories.iter().map(CategorySeed::to_model).collect();
    let (missing, skipped) = plan("categories", wanted, existing, |c| c.id, |seeded, row| seeded == row)?;

    let inserted =
        insert_active(db, missing.into_iter().map(category::ActiveModel::from).collect()).await?;
    debug!("Seeded categories: {} inserted, {} skipped", inserted, skipped);
    Ok(TableReport { inserted, skipped })
}

pub async fn seed_products<C: ConnectionTrait>(
    db: &C,
    products: &[ProductSeed],
) -> Result<TableReport, SeedError> {
    let existing = product::Entity::find()
        .filter(product::Column::Id.is_in(products.iter().map(|p| p.id)))
        .all(db)
        .await?;

    let wanted = products.iter().map(ProductSeed::to_model).collect();
    let (missing, skipped) = plan("products", wanted, existing, |p| p.id, |seeded, row| seeded == row)?;

    let inserted =
        insert_active(db, missing.into_iter().map(product::ActiveModel::from).collect()).await?;
    debug!("Seeded products: {} inserted, {} skipped", inserted, skipped);
    Ok(TableReport { inserted, skipped })
}

/// Splits `wanted` into rows to insert and a count of rows already present.
fn plan<M, K>(
    table: &'static str,
    wanted: Vec<M>,
    existing: Vec<M>,
    key: impl Fn(&M) -> K,
    same: impl Fn(&M, &M) -> bool,
) -> Result<(Vec<M>, u64), SeedError>
where
    K: Eq + Hash + fmt::Debug,
{
    let existing: HashMap<K, M> = existing.into_iter().map(|row| (key(&row), row)).collect();

    let mut missing = Vec::new();
    let mut skipped = 0;
    for seeded in wanted {
        match existing.get(&key(&seeded)) {
            Some(row) if same(&seeded, row) => skipped += 1,
            Some(_) => {
                return Err(SeedError::Conflict {
                    table,
                    key: format!("{:?}", key(&seeded)),
                });
            }
            None => missing.push(seeded),
        }
    }
    Ok((missing, skipped))
}

async fn insert_active<C, A>(db: &C, rows: Vec<A>) -> Result<u64, SeedError>
where
    C: ConnectionTrait,
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if rows.is_empty() {
        return Ok(0);
    }
    let count = rows.len() as u64;
    <A::Entity as EntityTrait>::insert_many(rows)
        .exec_without_returning(db)
        .await?;
    Ok(count)
}

/// Moves the integer key sequences past the explicitly seeded ids.
///
/// Only PostgreSQL needs this; SQLite and MySQL derive the next id from the
/// table contents.
async fn realign_sequences<C: ConnectionTrait>(db: &C) -> Result<(), SeedError> {
    if db.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }

    for table in [category::Entity.table_name(), product::Entity.table_name()] {
        trace!("Realigning id sequence of {}", table);
        db.execute_unprepared(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE((SELECT MAX(id) FROM {table}), 1))"
        ))
        .await?;
    }
    Ok(())
}
