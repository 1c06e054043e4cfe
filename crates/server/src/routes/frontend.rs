use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form, Json,
};
use tracing::{debug, warn};

use super::FrontendState;
use crate::errors::ApiError;
use crate::pages::{self, HomeContext};

pub async fn home() -> Html<String> {
    Html(pages::home_page(&HomeContext::now(), "/get_data"))
}

/// `POST /submit`: forward the form pairs as-is and hand back the backend's body.
/// The backend's status is not translated.
pub async fn submit(
    State(state): State<FrontendState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<String, ApiError> {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!(%rejection, "unreadable form body, forwarding no fields");
            Vec::new()
        }
    };
    let reply = state.backend.submit(&fields).await?;
    if !reply.status.is_success() {
        warn!(status = %reply.status, "backend answered /submit with non-success status");
    }
    Ok(reply.body)
}

/// `GET /get_data`: the backend's `/view` JSON, unchanged.
pub async fn get_data(State(state): State<FrontendState>) -> Result<Json<serde_json::Value>, ApiError> {
    let json = state.backend.fetch_data().await?;
    Ok(Json(json))
}
