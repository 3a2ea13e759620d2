//! CRUD operations for the `plugins` table.
//!
//! One row per listing URL. The version set is stored as a JSON array in a
//! text column; everything else maps to a plain text column.

use crate::error::{DatabaseError, Result};
use chrono::Utc;
use plugindex_core::{PluginRecord, VersionSet};
use sqlx::{Pool, Sqlite};

type PluginRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
);

const SELECT_COLUMNS: &str = "url, title, description, author, icon, versions, owner";

fn row_to_record(row: PluginRow) -> Result<PluginRecord> {
    let (url, title, description, author, icon_url, versions_json, owner) = row;
    let versions: Vec<String> = serde_json::from_str(&versions_json).map_err(|e| {
        DatabaseError::Decode(format!("invalid versions column for '{url}': {e}"))
    })?;
    Ok(PluginRecord {
        url,
        title,
        description,
        author,
        icon_url,
        versions: versions.into_iter().collect::<VersionSet>(),
        owner,
    })
}

/// List every stored record, ordered by URL.
pub async fn list_all(pool: &Pool<Sqlite>) -> Result<Vec<PluginRecord>> {
    let rows = sqlx::query_as::<_, PluginRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM plugins ORDER BY url"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(row_to_record).collect()
}

/// List the records belonging to one owner, ordered by URL.
pub async fn list_by_owner(pool: &Pool<Sqlite>, owner: &str) -> Result<Vec<PluginRecord>> {
    let rows = sqlx::query_as::<_, PluginRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM plugins WHERE owner = ? ORDER BY url"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(row_to_record).collect()
}

/// Replace-by-url upsert.
///
/// Any existing row with the same URL is removed and the new row inserted
/// inside one transaction, so readers never see both or neither.
pub async fn upsert(pool: &Pool<Sqlite>, record: &PluginRecord) -> Result<()> {
    let versions_json = serde_json::to_string(&record.versions)
        .map_err(|e| DatabaseError::Decode(format!("unencodable versions: {e}")))?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM plugins WHERE url = ?")
        .bind(&record.url)
        .execute(tx.as_mut())
        .await?;

    sqlx::query(
        "INSERT INTO plugins (url, title, description, author, icon, versions, owner, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.url)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.author)
    .bind(&record.icon_url)
    .bind(&versions_json)
    .bind(&record.owner)
    .bind(Utc::now().to_rfc3339())
    .execute(tx.as_mut())
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Delete the record for a URL, regardless of owner.
pub async fn delete_by_url(pool: &Pool<Sqlite>, url: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM plugins WHERE url = ?")
        .bind(url)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("no record for '{url}'")));
    }
    Ok(())
}

/// Delete the record for a URL only when it belongs to `owner`.
pub async fn delete_by_owner_and_url(pool: &Pool<Sqlite>, owner: &str, url: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM plugins WHERE owner = ? AND url = ?")
        .bind(owner)
        .bind(url)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!(
            "no record for '{url}' owned by '{owner}'"
        )));
    }
    Ok(())
}
