use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    /// When configured, the form updates this record directly instead of
    /// matching on name and email.
    pub default_participant_id: String,
}

pub async fn profile_handler() -> Html<String> {
    let default_participant_id = std::env::var("DEFAULT_PARTICIPANT_ID").unwrap_or_default();
    let template = ProfileTemplate {
        default_participant_id,
    };
    Html(template.render().unwrap())
}
