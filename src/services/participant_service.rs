use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::participant_repo;
use crate::models::ParticipantRow;

/// JSON shape of a participant record as clients see it. The identifier is
/// exposed as `_id` and the timestamps in camelCase, matching what existing
/// clients of the API already parse.
#[derive(Debug, Serialize, Clone)]
pub struct ParticipantView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub geotag: String,
    pub status: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// One row of the board table, pre-formatted for the template.
pub struct ParticipantCardView {
    pub name: String,
    pub email: String,
    pub geotag: String,
    pub is_available: bool,
    pub status_label: String,
}

fn to_view(row: ParticipantRow) -> ParticipantView {
    ParticipantView {
        id: row.participant_id.unwrap_or_default(),
        name: row.name.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        geotag: row.geotag.unwrap_or_default(),
        status: row.status.unwrap_or(0) == 1,
        created_at: row.created_at.unwrap_or_default(),
        updated_at: row.updated_at.unwrap_or_default(),
    }
}

pub async fn list_participant_views(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantView>> {
    let rows = participant_repo::list_participants(pool).await?;
    Ok(rows.into_iter().map(to_view).collect())
}

pub async fn load_participant_view(
    pool: &SqlitePool,
    participant_id: &str,
) -> sqlx::Result<Option<ParticipantView>> {
    let Some(row) = participant_repo::load_participant(pool, participant_id).await? else {
        return Ok(None);
    };
    Ok(Some(to_view(row)))
}

pub async fn build_board(pool: &SqlitePool) -> sqlx::Result<Vec<ParticipantCardView>> {
    let rows = participant_repo::list_participants(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let is_available = row.status.unwrap_or(0) == 1;
            let geotag = row
                .geotag
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| "N/A".to_string());
            ParticipantCardView {
                name: row.name.unwrap_or_default(),
                email: row.email.unwrap_or_default(),
                geotag,
                is_available,
                status_label: if is_available {
                    "Available".to_string()
                } else {
                    "Not Available".to_string()
                },
            }
        })
        .collect())
}

/// Checks an update payload before it touches the store. The merge itself
/// tolerates either field being absent, but a present-and-blank geotag would
/// hollow out a required column.
pub fn validate_update(geotag: Option<&str>, status: Option<bool>) -> Result<(), &'static str> {
    if geotag.is_none() && status.is_none() {
        return Err("payload must name geotag and/or status");
    }
    if let Some(g) = geotag {
        if g.trim().is_empty() {
            return Err("geotag must not be empty");
        }
    }
    Ok(())
}

/// Applies a partial merge and returns the refreshed record, or `None` when
/// the identifier is unknown (the store is untouched in that case).
pub async fn apply_update(
    pool: &SqlitePool,
    participant_id: &str,
    geotag: Option<&str>,
    status: Option<bool>,
) -> sqlx::Result<Option<ParticipantView>> {
    let affected =
        participant_repo::update_participant(pool, participant_id, geotag, status).await?;
    if affected == 0 {
        return Ok(None);
    }
    load_participant_view(pool, participant_id).await
}

/// First record whose name and email both match, scanning the list in stored
/// order. Emails are not unique, so the first hit wins.
pub fn match_by_identity<'a>(
    rows: &'a [ParticipantRow],
    name: &str,
    email: &str,
) -> Option<&'a str> {
    rows.iter()
        .find(|row| row.name.as_deref() == Some(name) && row.email.as_deref() == Some(email))
        .and_then(|row| row.participant_id.as_deref())
}

pub async fn resolve_by_identity(
    pool: &SqlitePool,
    name: &str,
    email: &str,
) -> sqlx::Result<Option<String>> {
    let rows = participant_repo::list_participants(pool).await?;
    Ok(match_by_identity(&rows, name, email).map(|id| id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, email: &str) -> ParticipantRow {
        ParticipantRow {
            participant_id: Some(id.to_string()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            geotag: Some("Main St".to_string()),
            status: Some(1),
            created_at: Some("2026-03-01T10:00:00.000Z".to_string()),
            updated_at: Some("2026-03-01T10:00:00.000Z".to_string()),
        }
    }

    #[test]
    fn identity_match_resolves_first_hit() {
        let rows = vec![row("1", "A", "a@x.com"), row("2", "B", "b@x.com")];
        assert_eq!(match_by_identity(&rows, "B", "b@x.com"), Some("2"));
    }

    #[test]
    fn identity_match_requires_both_fields() {
        let rows = vec![row("1", "A", "a@x.com"), row("2", "B", "b@x.com")];
        assert_eq!(match_by_identity(&rows, "B", "wrong@x.com"), None);
        assert_eq!(match_by_identity(&rows, "A", "b@x.com"), None);
    }

    #[test]
    fn identity_match_is_case_sensitive() {
        let rows = vec![row("1", "A", "a@x.com")];
        assert_eq!(match_by_identity(&rows, "a", "a@x.com"), None);
    }

    #[test]
    fn identity_match_takes_the_first_of_duplicate_emails() {
        let rows = vec![row("1", "A", "shared@x.com"), row("2", "A", "shared@x.com")];
        assert_eq!(match_by_identity(&rows, "A", "shared@x.com"), Some("1"));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(validate_update(None, None).is_err());
    }

    #[test]
    fn blank_geotag_is_rejected() {
        assert!(validate_update(Some("   "), None).is_err());
        assert!(validate_update(Some(""), Some(true)).is_err());
    }

    #[test]
    fn single_field_payloads_pass_validation() {
        assert!(validate_update(Some("Main St"), None).is_ok());
        assert!(validate_update(None, Some(false)).is_ok());
        assert!(validate_update(Some("Main St"), Some(true)).is_ok());
    }

    #[test]
    fn view_defaults_missing_fields() {
        let view = to_view(ParticipantRow {
            participant_id: Some("p-1".to_string()),
            name: None,
            email: None,
            geotag: None,
            status: None,
            created_at: None,
            updated_at: None,
        });
        assert_eq!(view.id, "p-1");
        assert_eq!(view.name, "");
        assert!(!view.status);
    }
}
