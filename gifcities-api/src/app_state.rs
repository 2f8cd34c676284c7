use std::sync::Arc;

use crate::domain::search::SearchService;

/// Handles built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    search_service: Arc<SearchService>,
}

impl AppState {
    pub fn new(search_service: SearchService) -> Self {
        Self {
            search_service: Arc::new(search_service),
        }
    }

    pub fn search_service(&self) -> &SearchService {
        &self.search_service
    }
}
