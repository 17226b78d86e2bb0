//! DNS-over-HTTPS (RFC 8484) with the user identity in the first path segment.
//!
//!   GET  /<user>?dns=<base64url>   unpadded base64url wire format
//!   POST /<user>                   raw wire format body
//!
//! `/` with no segment carries no identity and is answered as plain
//! passthrough.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hickory_proto::op::Message;
use sentinel_dns_application::use_cases::ReplyBuffer;
use sentinel_dns_domain::{DomainError, UserId};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::{errors::ApiError, state::AppState};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// RFC 8484 §6: maximum wire-format message size.
const MAX_DNS_MESSAGE_BYTES: usize = 65_535;

#[derive(Debug, Deserialize)]
pub struct DohParams {
    dns: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", any(query))
        .route("/{user_id}", any(query))
        .route("/{user_id}/{*rest}", any(query))
}

/// Answers one DoH request. Also serves methods the management paths do not
/// claim, so `POST /rules/u1` is a DoH query for user `rules`.
pub async fn query(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    params: Result<Query<DohParams>, QueryRejection>,
    body: Bytes,
) -> Response {
    let user = match user_from_path(uri.path()) {
        Ok(user) => user,
        Err(e) => return ApiError(e).into_response(),
    };

    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let reason = rejection.body_text();
            debug!(error = %reason, "Rejecting malformed DoH query string");
            return ApiError(DomainError::InvalidRequest(reason)).into_response();
        }
    };

    serve(state, user, &method, params, &body).await
}

/// The first path segment names the user; `/` carries no identity.
fn user_from_path(path: &str) -> Result<Option<UserId>, DomainError> {
    match path.trim_start_matches('/').split('/').next() {
        Some(segment) if !segment.is_empty() => UserId::parse(segment).map(Some),
        _ => Ok(None),
    }
}

async fn serve(
    state: AppState,
    user: Option<UserId>,
    method: &Method,
    params: DohParams,
    body: &[u8],
) -> Response {
    let request = match decode_request(method, params.dns.as_deref(), body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejecting undecodable DoH request");
            return ApiError(e).into_response();
        }
    };

    let mut reply = ReplyBuffer::new();
    let result = state.dns.execute(user.as_ref(), &request, &mut reply).await;

    let encoded = result.and_then(|_| {
        reply
            .into_message()
            .ok_or_else(|| DomainError::IoError("Pipeline produced no reply".to_string()))?
            .to_vec()
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
    });

    match encoded {
        Ok(bytes) => dns_message_response(bytes),
        Err(e) => {
            error!(error = %e, id = request.id(), "DoH query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Extracts the wire-format query from a DoH request.
pub fn decode_request(
    method: &Method,
    dns_param: Option<&str>,
    body: &[u8],
) -> Result<Message, DomainError> {
    let wire = match *method {
        Method::GET => {
            let encoded = dns_param.ok_or_else(|| {
                DomainError::InvalidRequest("Missing 'dns' query parameter".to_string())
            })?;
            URL_SAFE_NO_PAD.decode(encoded).map_err(|e| {
                DomainError::InvalidRequest(format!("Invalid base64url encoding: {}", e))
            })?
        }
        Method::POST => body.to_vec(),
        _ => {
            return Err(DomainError::InvalidRequest(format!(
                "Unsupported HTTP method: {}",
                method
            )))
        }
    };

    if wire.len() > MAX_DNS_MESSAGE_BYTES {
        return Err(DomainError::InvalidRequest(
            "DNS message too large".to_string(),
        ));
    }

    Message::from_vec(&wire).map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
}

fn dns_message_response(bytes: Vec<u8>) -> Response {
    let mut response = Response::new(axum::body::Body::from(bytes));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(DNS_MESSAGE_CONTENT_TYPE),
    );
    response
}
