mod dto;
pub mod handlers;

use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/comments", post(handlers::create_comment))
}
