//! Static page endpoints: landing, about, and the upload form.

use axum::response::Html;

use crate::views;

/// GET / and GET /index - landing page
pub async fn home() -> Html<String> {
    Html(views::index_page())
}

/// GET /about - static info page
pub async fn about() -> Html<String> {
    Html(views::about_page())
}

/// GET /nailprediction - upload form
pub async fn upload_form() -> Html<String> {
    Html(views::upload_form_page())
}
