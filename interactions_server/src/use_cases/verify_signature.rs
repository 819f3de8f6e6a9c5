use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, VerifyingKey};
use std::fmt;

use crate::domain::errors::InteractionError;

// Errors raised while loading the platform public key.
#[derive(Debug)]
pub enum KeyError {
    Hex(hex::FromHexError),
    Length(usize),
    InvalidPoint,
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Hex(err) => write!(f, "public key is not valid hex: {err}"),
            KeyError::Length(len) => write!(
                f,
                "public key must be {PUBLIC_KEY_LENGTH} bytes, got {len}"
            ),
            KeyError::InvalidPoint => write!(f, "public key is not a valid ed25519 key"),
        }
    }
}

impl std::error::Error for KeyError {}

// Checks the detached ed25519 signature the platform attaches to each
// interaction. The signed message is the timestamp header followed by the
// raw body bytes.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    pub fn from_hex(public_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(public_key.trim()).map_err(KeyError::Hex)?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::Length(bytes.len()))?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPoint)?;

        Ok(Self::new(key))
    }

    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), InteractionError> {
        let signature = signature.ok_or(InteractionError::MissingSignature)?;
        let timestamp = timestamp.ok_or(InteractionError::MissingTimestamp)?;
        let signature = decode_signature(signature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| InteractionError::InvalidSignature)
    }
}

// Decode the hex signature header into its 64 raw bytes.
pub fn decode_signature(signature: &str) -> Result<Signature, InteractionError> {
    let mut bytes = [0u8; SIGNATURE_LENGTH];
    hex::decode_to_slice(signature.trim(), &mut bytes)
        .map_err(|_| InteractionError::MalformedSignature)?;
    Ok(Signature::from_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{sign_request, signing_key, test_public_key_hex};
    use ed25519_dalek::Signer;

    const TIMESTAMP: &str = "1700000000";
    const BODY: &[u8] = br#"{"type":1}"#;

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::from_hex(&test_public_key_hex()).expect("expected test key to load")
    }

    #[test]
    fn when_signature_covers_timestamp_and_body_then_verifies() {
        let signature = sign_request(TIMESTAMP, BODY);

        let result = verifier().verify(Some(&signature), Some(TIMESTAMP), BODY);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn when_signature_header_is_missing_then_returns_missing_signature() {
        let result = verifier().verify(None, Some(TIMESTAMP), BODY);

        assert_eq!(result, Err(InteractionError::MissingSignature));
    }

    #[test]
    fn when_timestamp_header_is_missing_then_returns_missing_timestamp() {
        let signature = sign_request(TIMESTAMP, BODY);

        let result = verifier().verify(Some(&signature), None, BODY);

        assert_eq!(result, Err(InteractionError::MissingTimestamp));
    }

    #[test]
    fn when_body_is_tampered_then_returns_invalid_signature() {
        let signature = sign_request(TIMESTAMP, BODY);

        let result = verifier().verify(Some(&signature), Some(TIMESTAMP), br#"{"type":2}"#);

        assert_eq!(result, Err(InteractionError::InvalidSignature));
    }

    #[test]
    fn when_timestamp_differs_from_signed_one_then_returns_invalid_signature() {
        let signature = sign_request(TIMESTAMP, BODY);

        let result = verifier().verify(Some(&signature), Some("1700000001"), BODY);

        assert_eq!(result, Err(InteractionError::InvalidSignature));
    }

    #[test]
    fn when_signature_is_not_hex_or_wrong_length_then_returns_malformed_signature() {
        let verifier = verifier();

        assert_eq!(
            verifier.verify(Some("zz"), Some(TIMESTAMP), BODY),
            Err(InteractionError::MalformedSignature)
        );
        assert_eq!(
            verifier.verify(Some(&"ab".repeat(63)), Some(TIMESTAMP), BODY),
            Err(InteractionError::MalformedSignature)
        );
    }

    #[test]
    fn when_signature_is_hex_encoded_then_decoding_restores_the_same_bytes() {
        let signature = signing_key().sign(b"any message");

        let decoded = decode_signature(&hex::encode(signature.to_bytes()))
            .expect("expected signature to decode");

        assert_eq!(decoded.to_bytes(), signature.to_bytes());
    }

    #[test]
    fn when_public_key_is_invalid_then_from_hex_fails() {
        assert!(matches!(
            SignatureVerifier::from_hex("not-hex"),
            Err(KeyError::Hex(_))
        ));
        assert!(matches!(
            SignatureVerifier::from_hex("abcd"),
            Err(KeyError::Length(2))
        ));
    }

    #[test]
    fn when_public_key_has_surrounding_whitespace_then_loads() {
        let key = format!("  {}\n", test_public_key_hex());

        assert!(SignatureVerifier::from_hex(&key).is_ok());
    }
}
