use std::sync::Arc;

use super::auth::AuthManager;
use super::repository::BoatRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BoatRepository>,
    pub auth: Arc<AuthManager>,
}

impl AppState {
    pub fn new(repo: Arc<dyn BoatRepository>, auth: Arc<AuthManager>) -> Self {
        Self { repo, auth }
    }
}
