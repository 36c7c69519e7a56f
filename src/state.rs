use std::sync::Arc;

use crate::db::UserStore;
use crate::services::providers::RecommendationProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub recommender: Arc<dyn RecommendationProvider>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        recommender: Arc<dyn RecommendationProvider>,
        jwt_secret: String,
    ) -> Self {
        Self {
            store,
            recommender,
            jwt_secret,
        }
    }
}
