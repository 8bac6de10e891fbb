//! Map raw Bot API replies to domain results.
//!
//! Every reply is an envelope `{ ok, result, error_code, description, parameters }`.
//! Non-success statuses become `RateLimited` / `RemoteApi`; anything that does not
//! match the expected schema becomes `RemoteProtocol`.

use crate::domain::{ApiResponse, DomainError};
use serde::de::DeserializeOwned;

/// HTTP status Telegram uses for flood control.
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Longest slice of an unparseable body echoed into an error.
const BODY_SNIPPET_LEN: usize = 200;

/// Decode the reply of `method` into its `result` payload.
pub fn decode_response<T: DeserializeOwned>(
    method: &str,
    status: u16,
    body: &[u8],
) -> Result<T, DomainError> {
    if !(200..300).contains(&status) {
        return Err(error_from_reply(status, body));
    }

    let envelope: ApiResponse<T> = serde_json::from_slice(body).map_err(|e| {
        DomainError::RemoteProtocol(format!("{}: unexpected reply shape: {}", method, e))
    })?;

    if envelope.ok == Some(false) {
        return Err(DomainError::RemoteApi {
            status: envelope.error_code.unwrap_or(status),
            description: envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    envelope
        .result
        .ok_or_else(|| DomainError::RemoteProtocol(format!("{}: reply has no result", method)))
}

/// Build the error for a non-success HTTP status. The body is read leniently:
/// Telegram normally sends an error envelope, but proxies may not.
pub fn error_from_reply(status: u16, body: &[u8]) -> DomainError {
    let envelope = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body).ok();

    if status == STATUS_TOO_MANY_REQUESTS {
        let retry_after = envelope
            .as_ref()
            .and_then(|e| e.parameters.as_ref())
            .and_then(|p| p.retry_after)
            .unwrap_or(0);
        return DomainError::RateLimited { retry_after };
    }

    let description = envelope
        .and_then(|e| e.description)
        .unwrap_or_else(|| String::from_utf8_lossy(body).chars().take(BODY_SNIPPET_LEN).collect());

    DomainError::RemoteApi {
        status,
        description,
    }
}
