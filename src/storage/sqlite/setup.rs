use anyhow::{Context, Result};

use super::connection::DbConn;

/// Create missing tables; existing data is left alone.
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    conn.execute_batch(include_str!("schema.sql"))
        .context("Failed to create key-value schema")?;

    log::debug!("Database schema ready");
    Ok(())
}
