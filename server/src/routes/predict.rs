//! The upload-and-diagnose endpoint.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::error;

use naildx::diagnose;

use crate::state::SharedState;
use crate::views;

/// GET /nailresult - nothing to show; send the user back to the form.
pub async fn result_redirect() -> Redirect {
    Redirect::to("/nailprediction")
}

/// POST /nailresult - accept the multipart upload and render the prediction.
///
/// Client input problems (missing part, empty filename, disallowed extension)
/// come back as 400 with a short plain message; any processing failure is a
/// 500 with diagnostic detail.
pub async fn submit(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("image") {
                    continue;
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                    Err(e) => {
                        return (StatusCode::BAD_REQUEST, format!("Failed to read upload: {e}"))
                            .into_response();
                    }
                }
                break;
            }
            Ok(None) => break,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("Malformed form data: {e}"))
                    .into_response();
            }
        }
    }

    let Some((filename, bytes)) = upload else {
        return (StatusCode::BAD_REQUEST, "No file part").into_response();
    };

    // Hold the store lock across the whole pipeline so a concurrent request
    // cannot clear the saved file before it has been read back.
    let result = {
        let store = state.uploads.lock().await;
        diagnose(state.classifier.as_ref(), &store, &filename, &bytes)
    };

    match result {
        Ok(diagnosis) => Html(views::result_page(&diagnosis)).into_response(),
        Err(e) if e.is_client_error() => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Prediction failed for {:?}: {e}", filename);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction failed: {e}"),
            )
                .into_response()
        }
    }
}
