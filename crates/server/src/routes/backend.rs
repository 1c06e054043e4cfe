use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use common::types::SubmissionList;
use service::submission::domain::SubmissionInput;
use tracing::debug;

use super::StoreState;
use crate::errors::ApiError;

/// `POST /submit`: plain-text confirmation or rejection.
///
/// An undecodable body is read as a form with no fields. A repeated key
/// keeps its first value.
pub async fn submit(
    State(state): State<StoreState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<String, ApiError> {
    let input = match form {
        Ok(Form(pairs)) => SubmissionInput::from_pairs(&pairs),
        Err(rejection) => {
            debug!(%rejection, "unreadable form body, treating as empty");
            SubmissionInput::default()
        }
    };
    let outcome = state.submissions.record(input).await?;
    Ok(outcome.message())
}

/// `GET /view`: `{"data": [{name, email}, ...]}`.
pub async fn view(State(state): State<StoreState>) -> Result<Json<SubmissionList>, ApiError> {
    let list = state.submissions.list().await?;
    Ok(Json(list))
}
