use std::sync::Arc;

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns a `web::Error` stashed in the response extensions into the client facing JSON body
/// and logs one line per request.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let req_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| er.as_ref());
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    if let Some(er) = web_error {
        tracing::error!("SERVER ERROR: {er} ID: {req_id}");
    }

    let err_resp = client_status_and_error
        .as_ref()
        .map(|(status, cl_err)| (*status, Json(cl_err.body())).into_response());

    log::log_request(
        &req_id,
        &req_method,
        &uri,
        resp.status(),
        web_error,
        client_status_and_error.as_ref(),
    );

    match err_resp {
        Some(mut err_resp) => {
            // Keep the request id on the replaced response.
            if let Some(id) = resp.headers().get(REQUEST_ID_HEADER) {
                err_resp
                    .headers_mut()
                    .insert(REQUEST_ID_HEADER, id.clone());
            }
            err_resp
        }
        None => resp,
    }
}
