use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_picture_handler, health_handler, list_pictures_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/picture", get(get_picture_handler))
            .route("/pictures", get(list_pictures_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrologer_archive::ArchiveService;
    use astrologer_core::{
        Picture, PictureSource, ReadRepository, Repository, SourceError, StorageError,
    };
    use astrologer_storage::InMemoryRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use jiff::civil::{date, Date};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Source that serves `[8, 45, 99]` for any day, or always fails.
    struct StubSource {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PictureSource for StubSource {
        async fn fetch(&self, date: Date) -> Result<Picture, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Status {
                    status: 503,
                    url: "https://api.nasa.gov/planetary/apod".to_string(),
                });
            }
            Ok(Picture::new("title", date, vec![8, 45, 99]))
        }
    }

    /// Repository whose every operation fails.
    struct BrokenRepository;

    #[async_trait]
    impl ReadRepository for BrokenRepository {
        async fn get(&self, _date: Date) -> Result<Option<Picture>, StorageError> {
            Err(StorageError::Unavailable("db password=hunter2".to_string()))
        }

        async fn list(&self) -> Result<Vec<Picture>, StorageError> {
            Err(StorageError::Unavailable("db password=hunter2".to_string()))
        }
    }

    #[async_trait]
    impl Repository for BrokenRepository {
        async fn insert(&self, _picture: &Picture) -> Result<bool, StorageError> {
            Err(StorageError::Unavailable("db password=hunter2".to_string()))
        }
    }

    /// Repository that reads fine but refuses writes.
    struct ReadOnlyRepository;

    #[async_trait]
    impl ReadRepository for ReadOnlyRepository {
        async fn get(&self, _date: Date) -> Result<Option<Picture>, StorageError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<Picture>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl Repository for ReadOnlyRepository {
        async fn insert(&self, _picture: &Picture) -> Result<bool, StorageError> {
            Err(StorageError::Query("read-only transaction".to_string()))
        }
    }

    fn router_with<R: Repository>(repository: R, fail: bool) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource {
            fail,
            calls: Arc::clone(&calls),
        };
        let archive = ArchiveService::new(repository, source);
        (App::router(AppState::new(Arc::new(archive))), calls)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (app, _) = router_with(InMemoryRepository::new(), false);

        let (status, body) = get(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn picture_is_fetched_then_served_from_store() {
        let (app, calls) = router_with(InMemoryRepository::new(), false);

        let (status, body) = get(&app, "/picture?date=2022-09-15").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "title");
        assert_eq!(body["date"], "2022-09-15");
        assert_eq!(body["image"], "CC1j");

        let (status, again) = get(&app, "/picture?date=2022-09-15").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(again, body);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_date_is_bad_request() {
        let (app, calls) = router_with(InMemoryRepository::new(), false);

        let (status, body) = get(&app, "/picture").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "missing date parameter");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_date_is_bad_request() {
        let (app, calls) = router_with(InMemoryRepository::new(), false);

        for uri in [
            "/picture?date=15-09-2022",
            "/picture?date=2022-02-30",
            "/picture?date=2022-09-15T12:00:00",
            "/picture?date=",
            "/picture?date=%2B022-09-15",
            "/picture?date=-022-09-15",
            "/picture?date=%20022-09-15",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["message"].as_str().unwrap().contains("YYYY-MM-DD"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn source_failure_is_internal_error() {
        let (app, _) = router_with(InMemoryRepository::new(), true);

        let (status, body) = get(&app, "/picture?date=2022-09-15").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "something went wrong, try again.");
    }

    #[tokio::test]
    async fn store_failure_does_not_leak_details() {
        let (app, calls) = router_with(BrokenRepository, false);

        let (status, body) = get(&app, "/picture?date=2022-09-15").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("hunter2"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_archive_write_still_serves_picture() {
        let (app, calls) = router_with(ReadOnlyRepository, false);

        let (status, body) = get(&app, "/picture?date=2022-09-15").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2022-09-15");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn list_is_empty_array_for_empty_store() {
        let (app, _) = router_with(InMemoryRepository::new(), false);

        let (status, body) = get(&app, "/pictures").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn list_returns_archived_pictures() {
        let repository = InMemoryRepository::new();
        repository
            .insert(&Picture::new("older", date(2021, 9, 15), vec![1]))
            .await
            .unwrap();
        let (app, _) = router_with(repository, false);

        get(&app, "/picture?date=2022-09-15").await;
        let (status, body) = get(&app, "/pictures").await;

        assert_eq!(status, StatusCode::OK);
        let pictures = body.as_array().unwrap();
        assert_eq!(pictures.len(), 2);
        assert_eq!(pictures[0]["title"], "older");
        assert_eq!(pictures[1]["date"], "2022-09-15");
    }

    #[tokio::test]
    async fn list_failure_is_internal_error() {
        let (app, _) = router_with(BrokenRepository, false);

        let (status, _) = get(&app, "/pictures").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
