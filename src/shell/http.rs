use axum::{
    Extension, Router,
    http::Method,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::modules::time_entries::use_cases::list_time_entries_by_user::inbound::http::{
    self as list_http, PAGE_HEADER, PER_PAGE_HEADER, TOTAL_COUNT_HEADER,
};
use crate::shell::graphql;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/user/times", get(list_http::list_my_time_entries))
        .route("/users/{username}/times", get(list_http::list_user_time_entries))
        .with_state(state)
}

/// REST and GraphQL routes behind tracing and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers([TOTAL_COUNT_HEADER, PAGE_HEADER, PER_PAGE_HEADER]);

    router(state.clone())
        .route(
            graphql::ENDPOINT,
            get(graphql::graphiql).post(graphql::graphql),
        )
        .layer(Extension(graphql::schema(state)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
