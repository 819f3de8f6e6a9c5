use crate::domain::{Interaction, InteractionError};
use crate::interface_adapters::protocol::{ErrorResponse, InteractionRequest, InteractionResponse};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[tracing::instrument(
    name = "interaction",
    skip_all,
    fields(kind = tracing::field::Empty, command = tracing::field::Empty)
)]
pub async fn handle_interaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Nothing in the body is trusted until the signature checks out.
    state
        .verifier
        .verify(
            header_value(&headers, SIGNATURE_HEADER),
            header_value(&headers, TIMESTAMP_HEADER),
            &body,
        )
        .map_err(|err| {
            tracing::warn!(error = %err, "rejected interaction signature.");
            map_interaction_error(err)
        })?;

    let request: InteractionRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "failed to parse interaction payload.");
        map_interaction_error(InteractionError::MalformedPayload)
    })?;

    let span = tracing::Span::current();
    span.record("kind", request.kind);
    if let Some(name) = request.command_name() {
        span.record("command", name);
    }

    let interaction = Interaction::from(request);
    let reply = state.dispatch.execute(interaction).await.map_err(|err| {
        tracing::warn!(error = %err, "unsupported interaction.");
        map_interaction_error(err)
    })?;

    tracing::info!("interaction answered.");
    Ok(Json(reply.into()))
}

// Non-UTF-8 header values count as absent.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Maps interaction errors to HTTP responses.
fn map_interaction_error(err: InteractionError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        InteractionError::MissingSignature
        | InteractionError::MissingTimestamp
        | InteractionError::MalformedSignature
        | InteractionError::InvalidSignature => {
            error_response(StatusCode::UNAUTHORIZED, "invalid request signature")
        }
        InteractionError::MalformedPayload => {
            error_response(StatusCode::BAD_REQUEST, "malformed interaction payload")
        }
        InteractionError::UnsupportedType { .. } => {
            error_response(StatusCode::BAD_REQUEST, "unsupported interaction type")
        }
    }
}
