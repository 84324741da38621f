use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::{
    comments::dto::CommentRequest,
    error::ApiError,
    state::AppState,
    storage::CommentWithAuthor,
    validation::Payload,
};

#[instrument(skip_all)]
pub async fn create_comment(
    State(state): State<AppState>,
    Payload(comment): Payload<CommentRequest>,
) -> Result<(StatusCode, Json<CommentWithAuthor>), ApiError> {
    let comment = state.storage.add_comment(comment).await?;
    info!(
        comment_id = comment.comment.id,
        idea_id = comment.comment.idea_id,
        user_id = comment.author.id,
        "comment added"
    );
    Ok((StatusCode::CREATED, Json(comment)))
}
