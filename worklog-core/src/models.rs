use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One journal record from the `work_logs` table.
///
/// `content` holds either rich HTML (Quill output) or plain text; the
/// client decides how to render it. The column is nullable but rows
/// created through the API always carry at least an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub log_date: NaiveDate,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_dates_for_the_client() {
        let entry = Entry {
            id: 7,
            log_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            title: "Standup notes".to_string(),
            content: Some("<p>hi</p>".to_string()),
            created_at: "2024-01-31T09:00:00Z".parse().unwrap(),
            updated_at: "2024-01-31T09:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["log_date"], "2024-01-31");
        assert_eq!(json["title"], "Standup notes");
        assert_eq!(json["content"], "<p>hi</p>");
        assert_eq!(json["created_at"], "2024-01-31T09:00:00Z");
    }

    #[test]
    fn null_content_stays_null() {
        let entry = Entry {
            id: 1,
            log_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            title: "t".to_string(),
            content: None,
            created_at: "2024-02-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-02-01T00:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["content"].is_null());
    }
}
