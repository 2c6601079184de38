//! Scrape endpoint.
//!
//! - `200` + exposition text when every window group was fetched
//! - `502` + empty body when the admin API is unavailable
//! - `500` + empty body on internal inconsistencies

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use mastodon_exporter_core::error::ErrorKind;

use crate::app_state::AppState;
use crate::{collect, obs::exposition};

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorKind::Configuration | ErrorKind::InvalidCatalog | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let source = state.source();
    match collect::collect(source.as_ref(), state.catalog(), Utc::now()).await {
        Ok(results) => {
            let body = exposition::render(state.catalog(), &results);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
                body,
            )
                .into_response()
        }
        Err(e) => {
            let kind = e.kind();
            tracing::warn!(kind = kind.as_str(), error = %e, "scrape failed");
            status_for(kind).into_response()
        }
    }
}
