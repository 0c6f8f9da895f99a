use std::collections::HashMap;

use sqlx::SqlitePool;

use super::models::ShareKind;
use crate::error::AppResult;

/// Whether a record of the given kind exists.
pub async fn record_exists(pool: &SqlitePool, kind: ShareKind, record_id: i64) -> AppResult<bool> {
    let query = format!("SELECT id FROM {} WHERE id = ?", kind.record_table());
    let row: Option<(i64,)> = sqlx::query_as(&query)
        .bind(record_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Grant `user_email` access to a record. Returns `false` when the grant already existed.
///
/// The existence check and the insert are one statement, so a pair is never
/// stored twice through this path.
pub async fn grant(
    pool: &SqlitePool,
    kind: ShareKind,
    record_id: i64,
    user_email: &str,
) -> AppResult<bool> {
    let table = kind.share_table();
    let column = kind.share_column();
    let query = format!(
        "INSERT INTO {table} ({column}, user_email)
         SELECT ?, ?
         WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE {column} = ? AND user_email = ?)"
    );

    let result = sqlx::query(&query)
        .bind(record_id)
        .bind(user_email)
        .bind(record_id)
        .bind(user_email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Emails a single record is shared with, in grant order.
pub async fn shared_with(
    pool: &SqlitePool,
    kind: ShareKind,
    record_id: i64,
) -> AppResult<Vec<String>> {
    let query = format!(
        "SELECT user_email FROM {} WHERE {} = ? ORDER BY id",
        kind.share_table(),
        kind.share_column()
    );
    let rows: Vec<(String,)> = sqlx::query_as(&query)
        .bind(record_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(email,)| email).collect())
}

/// Emails for every record visible to `user_email`, keyed by record id.
/// Records without grants are absent from the map.
pub async fn shared_with_visible(
    pool: &SqlitePool,
    kind: ShareKind,
    user_email: &str,
) -> AppResult<HashMap<i64, Vec<String>>> {
    let column = kind.share_column();
    let query = format!(
        "SELECT {column}, user_email FROM {}
         WHERE {column} IN (SELECT id FROM {} WHERE {})
         ORDER BY id",
        kind.share_table(),
        kind.record_table(),
        visible_to_user_clause(kind)
    );

    let rows: Vec<(i64, String)> = sqlx::query_as(&query)
        .bind(user_email)
        .bind(user_email)
        .fetch_all(pool)
        .await?;

    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (record_id, email) in rows {
        grouped.entry(record_id).or_default().push(email);
    }
    Ok(grouped)
}

/// SQL condition selecting records visible to a user: created by them, or
/// shared with them. Binds the user email twice.
pub fn visible_to_user_clause(kind: ShareKind) -> String {
    format!(
        "(created_by = ? OR id IN (SELECT {} FROM {} WHERE user_email = ?))",
        kind.share_column(),
        kind.share_table()
    )
}
