use std::fmt;

// Errors that end an interaction request before a reply is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    MissingSignature,
    MissingTimestamp,
    MalformedSignature,
    InvalidSignature,
    MalformedPayload,
    UnsupportedType { kind: u64 },
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionError::MissingSignature => write!(f, "signature header is missing"),
            InteractionError::MissingTimestamp => write!(f, "timestamp header is missing"),
            InteractionError::MalformedSignature => {
                write!(f, "signature is not 64 hex-encoded bytes")
            }
            InteractionError::InvalidSignature => {
                write!(f, "signature does not match the request")
            }
            InteractionError::MalformedPayload => write!(f, "interaction payload is malformed"),
            InteractionError::UnsupportedType { kind } => {
                write!(f, "unsupported interaction type {kind}")
            }
        }
    }
}

impl std::error::Error for InteractionError {}
