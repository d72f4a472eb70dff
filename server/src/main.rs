//! Nail Diagnosis Server
//!
//! HTTP front-end for a pretrained nail-condition classifier. Serves the
//! landing, about, and upload-form pages, accepts an image upload on
//! `/nailresult`, and renders the predicted diagnosis with its confidence.

mod routes;
mod state;
mod views;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use naildx::{OnnxClassifier, UploadStore};

use crate::state::{AppState, ServerConfig, SharedState};

/// Uploads above this size are rejected outright.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Nail Diagnosis Server
#[derive(Parser, Debug)]
#[command(name = "naildx-server")]
#[command(version)]
#[command(about = "HTTP front-end for nail condition classification")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the ONNX classifier artifact
    #[arg(long, env = "NAILDX_MODEL", default_value = "models/nail_diagnosis_vgg16.onnx")]
    model: PathBuf,

    /// Directory holding the most recent upload
    #[arg(long, env = "NAILDX_UPLOAD_DIR", default_value = "static/uploads")]
    upload_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Nail Diagnosis Server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Model:      {:?}", cli.model);
    info!("  Upload dir: {:?}", cli.upload_dir);

    // Load the model once, up front; a missing or corrupt artifact aborts
    // startup rather than failing on the first request.
    let classifier = OnnxClassifier::load(&cli.model)?;
    let store = UploadStore::new(&cli.upload_dir)?;

    let config = ServerConfig { model_path: cli.model };
    let state = Arc::new(AppState::new(config, Arc::new(classifier), store));

    let app = build_router(state, &cli.upload_dir);

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the full application router around the shared state.
fn build_router(state: SharedState, upload_dir: &Path) -> Router {
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/index", get(routes::pages::home))
        .route("/about", get(routes::pages::about))
        .route("/nailprediction", get(routes::pages::upload_form))
        .route(
            "/nailresult",
            get(routes::predict::result_redirect).post(routes::predict::submit),
        )
        .route("/health", get(routes::health::health_check))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use image::{DynamicImage, ImageFormat};
    use ndarray::Array4;
    use tower::ServiceExt;

    use naildx::{Classifier, Result, UploadStore, CLASS_LABELS, NUM_CLASSES};

    const BOUNDARY: &str = "test-boundary";

    /// Classifier with a fixed winner, so handlers can be driven end to end.
    struct StubClassifier;

    impl Classifier for StubClassifier {
        fn predict(&self, _input: &Array4<f32>) -> Result<Vec<f32>> {
            let mut scores = vec![0.005; NUM_CLASSES];
            scores[6] = 0.9;
            Ok(scores)
        }
    }

    fn test_app() -> (tempfile::TempDir, Router) {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path()).unwrap();
        let config = ServerConfig {
            model_path: PathBuf::from("stub.onnx"),
        };
        let state = Arc::new(AppState::new(config, Arc::new(StubClassifier), store));
        let router = build_router(state, tmp.path());
        (tmp, router)
    }

    fn multipart_request(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/nailresult")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::new_rgb8(32, 32);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_nailresult_redirects_to_form() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nailresult")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/nailprediction"
        );
    }

    #[tokio::test]
    async fn test_post_without_image_field() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(multipart_request("attachment", "nail.png", &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "No file part");
    }

    #[tokio::test]
    async fn test_post_with_empty_filename() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(multipart_request("image", "", &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "No selected file");
    }

    #[tokio::test]
    async fn test_post_with_disallowed_extension() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(multipart_request("image", "scan.txt", b"plain text"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("Invalid file type"));
    }

    #[tokio::test]
    async fn test_post_valid_upload_renders_result() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(multipart_request("image", "nail.png", &png_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(CLASS_LABELS[6]));
        assert!(html.contains("90.00%"));
        assert!(html.contains("/uploads/nail.png"));
    }

    #[tokio::test]
    async fn test_post_undecodable_image_is_server_error() {
        let (_tmp, app) = test_app();

        let response = app
            .oneshot(multipart_request("image", "nail.png", b"not an image"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("Prediction failed"));
    }
}
