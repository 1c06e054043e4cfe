use axum::{extract::State, response::Html};

use super::StoreState;
use crate::errors::ApiError;
use crate::pages::{self, HomeContext};

pub async fn home() -> Html<String> {
    Html(pages::home_page(&HomeContext::now(), "/view"))
}

/// `GET /view`: HTML list of every stored entry.
pub async fn view(State(state): State<StoreState>) -> Result<Html<String>, ApiError> {
    let list = state.submissions.list().await?;
    Ok(Html(pages::view_page(&list.data)))
}
