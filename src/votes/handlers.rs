use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    state::AppState,
    storage::VoteToggle,
    validation::Payload,
    votes::dto::{VoteRemoved, VoteRequest},
};

/// POST /votes: a second vote by the same user on the same idea removes the
/// first one.
#[instrument(skip_all)]
pub async fn toggle_vote(
    State(state): State<AppState>,
    Payload(vote): Payload<VoteRequest>,
) -> Result<Response, ApiError> {
    match state.storage.toggle_vote(vote).await? {
        VoteToggle::Added(vote) => {
            info!(vote_id = vote.id, idea_id = vote.idea_id, user_id = vote.user_id, "vote added");
            Ok((StatusCode::CREATED, Json(vote)).into_response())
        }
        VoteToggle::Removed { idea_id } => {
            info!(idea_id, user_id = vote.user_id, "vote removed");
            Ok(Json(VoteRemoved {
                message: "Vote removed",
                idea_id,
            })
            .into_response())
        }
    }
}
