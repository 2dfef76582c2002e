use anyhow::{Context, Result};
use common::Argon2Hasher;
use migration::seed::{seed_catalog, SeedReport, SeedSet};
use sea_orm::TransactionTrait;
use tracing::{error, info, trace};

use crate::config::connect;

/// Runs the seeding routine in its own transaction.
pub async fn seed_database(database_url: &str) -> Result<SeedReport> {
    trace!("Entering seed_database function");
    let seed = SeedSet::load()?;
    let db = connect(database_url).await?;

    let txn = db.begin().await.context("Failed to open seed transaction")?;
    let report = match seed_catalog(&txn, &seed, &Argon2Hasher::new()).await {
        Ok(report) => report,
        Err(e) => {
            error!("Seeding failed, rolling back: {}", e);
            txn.rollback().await?;
            return Err(e.into());
        }
    };
    txn.commit().await?;

    info!("Seed data applied: {}", report);
    Ok(report)
}
