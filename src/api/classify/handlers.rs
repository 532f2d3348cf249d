use crate::api::models::*;
use axum::{Json, extract::State};
use chrono::Local;
use tracing::{error, info};

pub async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<Vec<ClassificationResult>>, AppError> {
    // Validate
    let comment = request.validate().map_err(AppError::BadRequest)?;

    info!(product_id = %comment.product_id, user_id = %comment.user_id, "Classifying comment");

    let date_comment = Local::now().format("%Y-%m-%d").to_string();

    // Classify
    let sentiment = state.model.classify(&comment.user_comment).map_err(|e| {
        error!(error = %e, "Inference failed");
        AppError::Internal("Hubo un problema procesando la solicitud".to_string())
    })?;

    info!(
        classification = sentiment.label(),
        rating = sentiment.rating(),
        "Comment classified"
    );

    // Persist comment row, then audit row reusing its generated id
    let idprodcomment = state
        .store
        .record_classification(&comment, sentiment.label(), sentiment.rating(), &date_comment)
        .map_err(|e| {
            error!(error = %e, "Database insert failed");
            AppError::Internal("Error al insertar el comentario en la base de datos".to_string())
        })?;

    info!(idprodcomment, "Comment stored");

    Ok(Json(vec![ClassificationResult {
        product_id: comment.product_id,
        user_comment: comment.user_comment,
        date_comment,
        classification: sentiment.label().to_string(),
        rating: sentiment.rating(),
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierError, Sentiment, SentimentModel};
    use crate::storage::CommentStore;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Fixed-answer model; `None` simulates inference failure.
    struct StubModel(Option<Sentiment>);

    impl SentimentModel for StubModel {
        fn classify(&self, _text: &str) -> Result<Sentiment, ClassifierError> {
            self.0.ok_or(ClassifierError::UnknownClass(9))
        }
    }

    fn test_state(prediction: Option<Sentiment>) -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let store = CommentStore::new(dir.path().join("test.db"));
        store.initialize().unwrap();
        let state = AppState {
            model: Arc::new(StubModel(prediction)),
            store: Arc::new(store),
        };
        (dir, state)
    }

    fn request(comment: &str) -> ClassifyRequest {
        ClassifyRequest {
            product_id: Some("P-1".to_string()),
            user_id: Some("U-1".to_string()),
            user_comment: Some(comment.to_string()),
        }
    }

    #[tokio::test]
    async fn valid_request_returns_single_result() {
        let (_dir, state) = test_state(Some(Sentiment::Positive));

        let Json(results) = classify_handler(State(state.clone()), Json(request("Excelente")))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product_id, "P-1");
        assert_eq!(results[0].user_comment, "Excelente");
        assert_eq!(results[0].classification, "Positivo");
        assert_eq!(results[0].rating, 5);
        assert_eq!(state.store.count_comments().unwrap(), 1);
    }

    #[tokio::test]
    async fn each_label_maps_to_its_rating() {
        for (sentiment, label, rating) in [
            (Sentiment::Positive, "Positivo", 5),
            (Sentiment::Negative, "Negativo", 1),
            (Sentiment::Neutral, "Neutro", 3),
            (Sentiment::Invalid, "Invalido", 0),
        ] {
            let (_dir, state) = test_state(Some(sentiment));
            let Json(results) = classify_handler(State(state), Json(request("un comentario")))
                .await
                .unwrap();
            assert_eq!(results[0].classification, label);
            assert_eq!(results[0].rating, rating);
        }
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (_dir, state) = test_state(Some(Sentiment::Neutral));
        let req = ClassifyRequest {
            product_id: None,
            user_id: Some("U-1".to_string()),
            user_comment: Some("hola".to_string()),
        };

        let err = classify_handler(State(state.clone()), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        // Nothing persisted on rejection
        assert_eq!(state.store.count_comments().unwrap(), 0);
    }

    #[tokio::test]
    async fn inference_failure_is_internal_error() {
        let (_dir, state) = test_state(None);

        let err = classify_handler(State(state.clone()), Json(request("hola")))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(state.store.count_comments().unwrap(), 0);
    }

    #[tokio::test]
    async fn database_failure_is_internal_error() {
        let dir = TempDir::new().unwrap();
        // Store never initialized: the tables are missing, inserts fail
        let state = AppState {
            model: Arc::new(StubModel(Some(Sentiment::Positive))),
            store: Arc::new(CommentStore::new(dir.path().join("missing.db"))),
        };

        let err = classify_handler(State(state), Json(request("hola")))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
