use axum::Router;

pub mod index;

pub fn router() -> Router {
    Router::new().merge(index::router())
}
