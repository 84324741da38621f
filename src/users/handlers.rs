use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    storage::NewUser,
    users::{
        dto::{CreateUserRequest, LoginRequest, PublicUser, UserProfile},
        password,
    },
    validation::{parse_id, Payload},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
}

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    Payload(input): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    if state.storage.get_user_by_username(&input.username).await.is_some() {
        warn!(username = %input.username, "username already exists");
        return Err(ApiError::Conflict("Username already exists".into()));
    }

    let password_hash = password::hash(input.password).await?;

    let user = state
        .storage
        .create_user(NewUser {
            username: input.username,
            password_hash,
            name: input.name,
            email: input.email,
            avatar: input.avatar,
            bio: input.bio,
            skills: input.skills,
        })
        .await?;

    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    let users = state.storage.list_users().await;
    Json(users.into_iter().map(PublicUser::from).collect())
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = match parse_id(&raw_id) {
        Some(id) => state.storage.get_user(id).await,
        None => None,
    }
    .ok_or_else(|| ApiError::not_found("User"))?;

    let ideas = state.storage.user_ideas(user.id).await;
    let collaborations = state.storage.collaborations_for_user(user.id).await;

    Ok(Json(UserProfile {
        user: user.into(),
        ideas,
        collaborations,
    }))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Payload(creds): Payload<LoginRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let Some(user) = state.storage.get_user_by_username(&creds.username).await else {
        warn!(username = %creds.username, "login unknown username");
        return Err(ApiError::Unauthorized("Invalid credentials"));
    };

    if !password::verify(creds.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials"));
    }

    info!(user_id = user.id, "user logged in");
    Ok(Json(user.into()))
}
