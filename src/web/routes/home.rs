use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::{web::WebResult, AppState};

/// The landing page with the waitlist form.
pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = app_state
        .templ_mgr
        .render_landing_page("/api/subscribe", "/api/count")
        .context("tera failed to render 'html/home.html' template")?;

    Ok(Html(body))
}
