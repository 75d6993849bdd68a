use std::sync::Arc;

use crate::config::Config;
use crate::db::IssueStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn IssueStore>,
    pub config: Config,
}
