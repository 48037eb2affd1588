//! Entry repository — parameterized SQL against the `work_logs` table.
//!
//! Every statement binds user input; ids are assigned by MySQL on insert.
//! Absence (get/update/delete of an unknown id) is reported through
//! `Option`/`bool` return values, never as an error — the HTTP layer picks
//! the response code.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use worklog_core::{Entry, WorklogError};

/// Maximum page size for listing.
const MAX_LIMIT: i64 = 100;

/// Default page size when none specified.
const DEFAULT_LIMIT: i64 = 50;

/// Hard cap on `title`, matching the VARCHAR(200) column.
const MAX_TITLE_CHARS: usize = 200;

/// Optional list filter and paging, deserialized straight from the query
/// string.
#[derive(Debug, Default, Deserialize)]
pub struct ListFilter {
    pub log_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of entries plus the filter-wide total row count.
#[derive(Debug)]
pub struct EntryPage {
    pub list: Vec<Entry>,
    pub total: i64,
}

/// Create payload. Requiredness is checked here, not by serde, so a missing
/// field surfaces as a `Validation` error rather than a deserialization
/// failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewEntry {
    pub log_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial update payload. `None` means "leave the stored value alone";
/// `Some("")` for `content` is a real overwrite.
#[derive(Debug, Default, Deserialize)]
pub struct EntryPatch {
    pub log_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn list(pool: &MySqlPool, filter: &ListFilter) -> Result<EntryPage, WorklogError> {
    let limit = clamp_limit(filter.limit);
    let offset = clamp_offset(filter.offset);

    let list = match filter.log_date {
        Some(date) => {
            sqlx::query_as::<_, Entry>(
                "SELECT id, log_date, title, content, created_at, updated_at \
                 FROM work_logs WHERE log_date = ? \
                 ORDER BY log_date DESC, id DESC LIMIT ? OFFSET ?",
            )
            .bind(date)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Entry>(
                "SELECT id, log_date, title, content, created_at, updated_at \
                 FROM work_logs ORDER BY log_date DESC, id DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    // Total is computed with the same filter but independently of paging.
    let (total,): (i64,) = match filter.log_date {
        Some(date) => {
            sqlx::query_as("SELECT COUNT(*) FROM work_logs WHERE log_date = ?")
                .bind(date)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM work_logs")
                .fetch_one(pool)
                .await?
        }
    };

    Ok(EntryPage { list, total })
}

pub async fn get(pool: &MySqlPool, id: i64) -> Result<Option<Entry>, WorklogError> {
    let entry = sqlx::query_as::<_, Entry>(
        "SELECT id, log_date, title, content, created_at, updated_at \
         FROM work_logs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Inserts a new entry and returns its assigned id. `content` defaults to
/// the empty string so the column never starts out NULL through this path.
pub async fn create(pool: &MySqlPool, entry: &NewEntry) -> Result<i64, WorklogError> {
    let log_date = entry
        .log_date
        .ok_or_else(|| WorklogError::Validation("log_date is required".to_string()))?;
    let title = entry
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| WorklogError::Validation("title is required".to_string()))?;
    check_title_length(title)?;

    let result = sqlx::query("INSERT INTO work_logs (log_date, title, content) VALUES (?, ?, ?)")
        .bind(log_date)
        .bind(title)
        .bind(entry.content.as_deref().unwrap_or(""))
        .execute(pool)
        .await?;

    Ok(result.last_insert_id() as i64)
}

/// COALESCE-merges the provided fields into an existing row; returns whether
/// a row with this id existed. An empty `title` would violate the not-empty
/// row contract, so it is treated as absent.
pub async fn update(pool: &MySqlPool, id: i64, patch: &EntryPatch) -> Result<bool, WorklogError> {
    let title = patch.title.as_deref().filter(|t| !t.trim().is_empty());
    if let Some(title) = title {
        check_title_length(title)?;
    }

    let result = sqlx::query(
        "UPDATE work_logs \
         SET log_date = COALESCE(?, log_date), \
             title = COALESCE(?, title), \
             content = COALESCE(?, content) \
         WHERE id = ?",
    )
    .bind(patch.log_date)
    .bind(title)
    .bind(patch.content.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard delete; returns whether a row existed.
pub async fn delete(pool: &MySqlPool, id: i64) -> Result<bool, WorklogError> {
    let result = sqlx::query("DELETE FROM work_logs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn check_title_length(title: &str) -> Result<(), WorklogError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(WorklogError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

/// Non-positive or absent limits fall back to the default; everything is
/// capped at [`MAX_LIMIT`].
fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT)
}

fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.filter(|o| *o >= 0).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(100)), 100);
        assert_eq!(clamp_limit(Some(101)), 100);
        assert_eq!(clamp_limit(Some(5000)), 100);
        assert_eq!(clamp_limit(Some(0)), 50);
        assert_eq!(clamp_limit(Some(-3)), 50);
    }

    #[test]
    fn offset_defaults_and_floors() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(0)), 0);
        assert_eq!(clamp_offset(Some(20)), 20);
        assert_eq!(clamp_offset(Some(-1)), 0);
    }

    #[test]
    fn title_length_rule() {
        assert!(check_title_length(&"a".repeat(200)).is_ok());
        assert!(check_title_length(&"a".repeat(201)).is_err());
        // Counted in characters, not bytes.
        assert!(check_title_length(&"일".repeat(200)).is_ok());
    }

    #[test]
    fn patch_distinguishes_absent_from_empty_content() {
        let absent: EntryPatch = serde_json::from_str(r#"{"title":"new"}"#).unwrap();
        assert!(absent.content.is_none());

        let emptied: EntryPatch = serde_json::from_str(r#"{"content":""}"#).unwrap();
        assert_eq!(emptied.content.as_deref(), Some(""));
    }

    #[test]
    fn new_entry_tolerates_missing_fields() {
        let entry: NewEntry = serde_json::from_str("{}").unwrap();
        assert!(entry.log_date.is_none());
        assert!(entry.title.is_none());
        assert!(entry.content.is_none());
    }
}
