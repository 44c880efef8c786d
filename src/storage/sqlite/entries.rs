use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;

pub fn find_value(conn: &mut DbConn, key: &str) -> Result<Option<String>> {
    let sql = "SELECT value FROM kv_entries WHERE key = ?1";

    conn.query_row(sql, params![key], |row| row.get(0))
        .optional()
        .with_context(|| format!("Failed to read key: {key}"))
}

pub fn upsert_value(conn: &mut DbConn, key: &str, value: &str) -> Result<()> {
    let sql = "INSERT INTO kv_entries (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";

    conn.execute(sql, params![key, value])
        .with_context(|| format!("Failed to write key: {key}"))
        .map(|_| ())
}

pub fn delete_value(conn: &mut DbConn, key: &str) -> Result<()> {
    let sql = "DELETE FROM kv_entries WHERE key = ?1";

    conn.execute(sql, params![key])
        .with_context(|| format!("Failed to remove key: {key}"))
        .map(|_| ())
}

pub fn count_entries(conn: &mut DbConn) -> Result<usize> {
    let sql = "SELECT COUNT(*) FROM kv_entries";

    conn.query_row(sql, [], |row| row.get::<_, i64>(0))
        .map(|count| count as usize)
        .context("Failed to count stored entries")
}
