use sqlx::SqlitePool;

use crate::models::ParticipantRow;

pub const SQL_CREATE_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
    participant_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    geotag TEXT NOT NULL,
    status INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

pub const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
    participant_id,
    name,
    email,
    geotag,
    status,
    created_at,
    updated_at
FROM participants
ORDER BY created_at, participant_id
"#;

pub const SQL_LOAD_PARTICIPANT: &str = r#"
SELECT
    participant_id,
    name,
    email,
    geotag,
    status,
    created_at,
    updated_at
FROM participants
WHERE participant_id = ?1
LIMIT 1
"#;

// Partial merge: a NULL bind leaves the stored value in place.
pub const SQL_UPDATE_PARTICIPANT: &str = r#"
UPDATE participants
SET geotag = COALESCE(?2, geotag),
    status = COALESCE(?3, status),
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
WHERE participant_id = ?1
"#;

pub const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants (participant_id, name, email, geotag, status, created_at, updated_at)
VALUES (
    ?1, ?2, ?3, ?4, ?5,
    strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
    strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
)
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_PARTICIPANTS).execute(pool).await?;
    Ok(())
}

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_LIST_PARTICIPANTS)
        .fetch_all(pool)
        .await
}

pub async fn load_participant(
    pool: &SqlitePool,
    participant_id: &str,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_LOAD_PARTICIPANT)
        .bind(participant_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_participant(
    pool: &SqlitePool,
    participant_id: &str,
    geotag: Option<&str>,
    status: Option<bool>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_PARTICIPANT)
        .bind(participant_id)
        .bind(geotag)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn insert_participant(
    pool: &SqlitePool,
    participant_id: &str,
    name: &str,
    email: &str,
    geotag: &str,
    status: bool,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(participant_id)
        .bind(name)
        .bind(email)
        .bind(geotag)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // One connection, or every pooled connection gets its own empty
    // in-memory database.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn update_merges_only_named_fields() {
        let pool = test_pool().await;
        insert_participant(&pool, "p-1", "Ava", "ava@x.com", "Old Town", true)
            .await
            .unwrap();
        let before = load_participant(&pool, "p-1").await.unwrap().unwrap();

        let affected = update_participant(&pool, "p-1", Some("Main St"), None)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let after = load_participant(&pool, "p-1").await.unwrap().unwrap();
        assert_eq!(after.geotag.as_deref(), Some("Main St"));
        assert_eq!(after.status, Some(1));
        assert_eq!(after.name.as_deref(), Some("Ava"));
        assert_eq!(after.email.as_deref(), Some("ava@x.com"));
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn update_status_alone_keeps_geotag() {
        let pool = test_pool().await;
        insert_participant(&pool, "p-1", "Ava", "ava@x.com", "Main St", true)
            .await
            .unwrap();

        let affected = update_participant(&pool, "p-1", None, Some(false))
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let after = load_participant(&pool, "p-1").await.unwrap().unwrap();
        assert_eq!(after.geotag.as_deref(), Some("Main St"));
        assert_eq!(after.status, Some(0));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_noop() {
        let pool = test_pool().await;
        insert_participant(&pool, "p-1", "Ava", "ava@x.com", "Main St", true)
            .await
            .unwrap();
        let before = load_participant(&pool, "p-1").await.unwrap().unwrap();

        let affected = update_participant(&pool, "missing", Some("Elsewhere"), Some(false))
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let after = load_participant(&pool, "p-1").await.unwrap().unwrap();
        assert_eq!(after.geotag, before.geotag);
        assert_eq!(after.status, before.status);
        assert_eq!(after.updated_at, before.updated_at);
        assert_eq!(list_participants(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_returns_rows_in_insertion_order() {
        let pool = test_pool().await;
        insert_participant(&pool, "p-1", "Ava", "ava@x.com", "Main St", true)
            .await
            .unwrap();
        insert_participant(&pool, "p-2", "Ben", "ben@x.com", "Side St", false)
            .await
            .unwrap();

        let rows = list_participants(&pool).await.unwrap();
        let ids: Vec<_> = rows
            .iter()
            .filter_map(|r| r.participant_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }
}
