use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tracing::{error, info, warn};

use crate::config::connect;

/// Drops all tables and applies every migration again.
pub async fn reset_database(database_url: &str) -> Result<()> {
    let db = connect(database_url).await?;

    warn!("Dropping all tables and rebuilding the store");
    if let Err(e) = Migrator::fresh(&db).await {
        error!("Failed to rebuild database: {}", e);
        return Err(e.into());
    }

    info!("Database rebuilt from scratch");
    Ok(())
}
