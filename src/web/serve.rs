use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, field, info, warn, Span};

use crate::{App, AppState};

use super::{midware, routes::routes, WebResult, REQUEST_ID_HEADER};

/// Serves the waitlist on the already bound listener.
///
/// Only returns early with the IO error from `axum::serve`.
pub async fn serve(app: App) -> WebResult<()> {
    let App {
        app_state,
        listener,
    } = app;

    axum::serve(listener, router(app_state)).await?;

    Ok(())
}

/// All routes wrapped in the request id, tracing and error mapping layers.
fn router(app_state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_request(|req: &Request<Body>, _: &Span| info!("START {} {}", req.method(), req.uri()))
        .on_response(log_response);

    routes(app_state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(trace_layer)
            // Responses pass the layers bottom up: the id header is already there for the mapper.
            .layer(middleware::map_response(midware::response_mapper))
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
}

fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        request_id,
        method = %req.method(),
        path = req.uri().path(),
        status = field::Empty,
    )
}

fn log_response(res: &Response<Body>, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", status.as_u16());

    if status.is_server_error() {
        error!("END in {latency:?} - {status}");
    } else if status.is_client_error() {
        warn!("END in {latency:?} - {status}");
    } else {
        info!("END in {latency:?} - {status}");
    }
}
