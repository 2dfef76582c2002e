use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use tracing::info;

use crate::config::connect;

/// Builds the schema and seeds the catalog by applying pending migrations.
pub async fn init_database(database_url: &str) -> Result<()> {
    let db = connect(database_url).await?;

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    Migrator::up(&db, None)
        .await
        .context("Failed to apply catalog migrations")?;

    info!("Catalog store ready ({} migrations applied)", pending);
    Ok(())
}
