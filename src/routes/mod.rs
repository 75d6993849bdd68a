pub mod issues;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new().route(
        "/api/issues/{project}",
        get(issues::list)
            .post(issues::create)
            .put(issues::update)
            .delete(issues::delete),
    )
}
