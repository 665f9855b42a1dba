use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport failure taxonomy.
///
/// Validation failures never show up here; they are caught before a request
/// is issued. Transport errors are mapped to a user-facing string at the
/// call site and stored in the owning container's error slot, never
/// propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },
    /// No response was received at all.
    #[error("no response from the server")]
    NoResponse,
    /// Anything else, including a success response with a missing body.
    #[error("unknown error")]
    Unknown,
}

impl TransportError {
    #[must_use]
    pub fn from_status(status: u16, reason: &str) -> Self {
        Self::Status {
            status,
            reason: reason.to_string(),
        }
    }

    /// Message stored in the owning container's error slot. `action` is the
    /// operation in progress, e.g. "Loading listings".
    #[must_use]
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Status { status, reason } => format!("{action} failed: {status} {reason}"),
            Self::NoResponse => {
                format!("{action} failed. Check your connection or the server and try again.")
            }
            Self::Unknown => format!("{action} failed: an unknown error occurred."),
        }
    }
}

/// Collapses a capability response into body-or-transport-error.
pub fn decode_response<T>(
    result: crux_http::Result<crux_http::Response<T>>,
) -> Result<T, TransportError> {
    match result {
        Ok(mut response) => {
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status as u16,
                    reason: status.canonical_reason().to_string(),
                });
            }
            response.take_body().ok_or(TransportError::Unknown)
        }
        Err(err) => {
            tracing::debug!(error = %err, "transport failure without a response");
            Err(TransportError::NoResponse)
        }
    }
}

/// Like [`decode_response`] for operations where only success matters
/// (delete returns no meaningful body).
pub fn ack_response<T>(
    result: crux_http::Result<crux_http::Response<T>>,
) -> Result<(), TransportError> {
    match result {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(TransportError::Status {
                    status: status as u16,
                    reason: status.canonical_reason().to_string(),
                })
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "transport failure without a response");
            Err(TransportError::NoResponse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_carry_status_and_reason() {
        let err = TransportError::from_status(404, "Not Found");
        assert_eq!(
            err.user_message("Loading the listing"),
            "Loading the listing failed: 404 Not Found"
        );
    }

    #[test]
    fn no_response_maps_to_a_connectivity_message() {
        let msg = TransportError::NoResponse.user_message("Loading listings");
        assert!(msg.contains("Check your connection"));
    }

    #[test]
    fn errored_transport_is_no_response() {
        let result: crux_http::Result<crux_http::Response<Vec<u8>>> =
            Err(crux_http::Error::Io("connection refused".to_string()));
        assert_eq!(decode_response(result), Err(TransportError::NoResponse));
    }

    #[test]
    fn successful_body_is_returned() {
        let response = crux_http::testing::ResponseBuilder::ok()
            .body(vec![1u8, 2, 3])
            .build();
        assert_eq!(decode_response(Ok(response)), Ok(vec![1u8, 2, 3]));
    }

    #[test]
    fn ack_ignores_the_body() {
        let response = crux_http::testing::ResponseBuilder::ok()
            .body(Vec::<u8>::new())
            .build();
        assert_eq!(ack_response(Ok(response)), Ok(()));
    }
}
