use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Landing-page counters. `investments` is a display string from config.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub users: usize,
    pub ideas: usize,
    pub collaborations: usize,
    pub investments: String,
}

#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let counts = state.storage.counts().await;
    Json(Stats {
        users: counts.users,
        ideas: counts.ideas,
        collaborations: counts.accepted_collaborations,
        investments: state.config.stats_investments.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialization() {
        let stats = Stats {
            users: 3,
            ideas: 4,
            collaborations: 1,
            investments: "$2.3M".into(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["investments"], "$2.3M");
        assert_eq!(json["collaborations"], 1);
    }
}
