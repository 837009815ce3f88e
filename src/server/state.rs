use std::sync::Arc;

use crate::feed::FeedClient;
use crate::map::MapConfig;

// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub map: Arc<MapConfig>,
    pub feed: FeedClient,
}

impl AppState {
    pub fn new(map: MapConfig, feed: FeedClient) -> Self {
        Self {
            map: Arc::new(map),
            feed,
        }
    }
}
