use axum::{Router, http::Uri};

use crate::errors::AppError;

pub mod validation;

pub fn create_router() -> Router {
    tracing::debug!("Creating application router");
    Router::new()
        .merge(validation::router())
        .fallback(unknown_route)
}

async fn unknown_route(uri: Uri) -> AppError {
    AppError::UnknownRoute(uri.path().to_string())
}
