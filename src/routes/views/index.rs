use askama::Template;
use axum::{Router, http::StatusCode, response::Html, routing::get};

pub const PAGE_TITLE: &str = "Simple TODO";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    title: &'static str,
}

type HtmlError = (StatusCode, Html<String>);

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Result<Html<String>, HtmlError> {
    let rendered = IndexTemplate { title: PAGE_TITLE }.render().map_err(|err| {
        tracing::error!(error = %err, "failed to render index page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("failed to render index page".to_string()),
        )
    })?;
    Ok(Html(rendered))
}
