use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::models::{Candidate, RecommendRequest};
use crate::services::recommendations;
use crate::state::AppState;

/// Handler for the recommendation proxy.
///
/// Candidates are relayed to the client as normalized; nothing is persisted
/// on this path.
pub async fn recommend(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<Vec<Candidate>>> {
    let candidates =
        recommendations::get_recommendations(state.recommender.as_ref(), &request).await?;
    Ok(Json(candidates))
}
