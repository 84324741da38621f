use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::{
    collaborations::dto::CollaborationRequest,
    error::ApiError,
    state::AppState,
    storage::Collaboration,
    validation::Payload,
};

#[instrument(skip_all)]
pub async fn create_collaboration(
    State(state): State<AppState>,
    Payload(request): Payload<CollaborationRequest>,
) -> Result<(StatusCode, Json<Collaboration>), ApiError> {
    let collaboration = state.storage.add_collaboration(request).await?;
    info!(
        collaboration_id = collaboration.id,
        idea_id = collaboration.idea_id,
        status = ?collaboration.status,
        "collaboration requested"
    );
    Ok((StatusCode::CREATED, Json(collaboration)))
}
