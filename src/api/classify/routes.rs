use crate::api::classify::handlers::classify_handler;
use crate::api::models::AppState;
use axum::{Router, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new().route("/clasificar", post(classify_handler))
}
