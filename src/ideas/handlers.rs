use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    ideas::dto::{CreateIdeaRequest, FeaturedParams, SearchParams, ViewerParams},
    state::AppState,
    storage::{Collaboration, Idea, IdeaDetail, IdeaWithVotes},
    validation::{parse_id, query, split_tags, Payload},
};

pub fn idea_routes() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/featured", get(featured_ideas))
        .route("/ideas/:id", get(get_idea))
        .route("/ideas/:id/collaborations", get(idea_collaborations))
}

/// GET /ideas?q=&tags=a,b
///
/// `q` is matched as sent, surrounding whitespace included.
#[instrument(skip_all)]
pub async fn list_ideas(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<IdeaWithVotes>>, ApiError> {
    let p = query(params)?;
    let q = p.q.as_deref().unwrap_or_default();
    let tags = split_tags(p.tags.as_deref());
    let ideas = if q.is_empty() && tags.is_empty() {
        state.storage.list_ideas(p.user_id).await
    } else {
        state.storage.search_ideas(q, &tags, p.user_id).await
    };
    Ok(Json(ideas))
}

#[instrument(skip_all)]
pub async fn featured_ideas(
    State(state): State<AppState>,
    params: Result<Query<FeaturedParams>, QueryRejection>,
) -> Result<Json<Vec<IdeaWithVotes>>, ApiError> {
    let p = query(params)?;
    let limit = p.limit.unwrap_or(state.config.featured_limit);
    Ok(Json(state.storage.featured_ideas(limit, p.user_id).await))
}

#[instrument(skip(state, params))]
pub async fn get_idea(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: Result<Query<ViewerParams>, QueryRejection>,
) -> Result<Json<IdeaDetail>, ApiError> {
    let viewer = query(params)?.user_id;
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::not_found("Idea"))?;
    let idea = state
        .storage
        .get_idea(id, viewer)
        .await
        .ok_or_else(|| ApiError::not_found("Idea"))?;
    let comments = state.storage.comments_for_idea(id).await;
    Ok(Json(IdeaDetail { idea, comments }))
}

#[instrument(skip(state))]
pub async fn idea_collaborations(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Collaboration>>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::not_found("Idea"))?;
    Ok(Json(state.storage.collaborations_for_idea(id).await?))
}

#[instrument(skip_all)]
pub async fn create_idea(
    State(state): State<AppState>,
    Payload(new_idea): Payload<CreateIdeaRequest>,
) -> Result<(StatusCode, Json<Idea>), ApiError> {
    let idea = state.storage.create_idea(new_idea).await?;
    info!(idea_id = idea.id, user_id = idea.user_id, "idea created");
    Ok((StatusCode::CREATED, Json(idea)))
}
