use askama::Template;
use axum::{extract::State, response::Html};
use sqlx::SqlitePool;

use crate::services::participant_service::{self, ParticipantCardView};

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub participants: Vec<ParticipantCardView>,
    pub load_error: bool,
}

pub async fn board_handler(State(pool): State<SqlitePool>) -> Html<String> {
    let (participants, load_error) = match participant_service::build_board(&pool).await {
        Ok(participants) => (participants, false),
        Err(e) => {
            tracing::warn!("board load failed: {}", e);
            (vec![], true)
        }
    };

    let template = BoardTemplate {
        participants,
        load_error,
    };
    Html(template.render().unwrap())
}
