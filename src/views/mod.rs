pub mod index;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index::index))
        .route("/{project}/", get(project::show))
}
