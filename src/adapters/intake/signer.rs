//! `Intake-Signature` header signing and verification.
//!
//! Header format:
//!
//! ```text
//! t=<unix seconds>,v1=<hex hmac-sha256 of "<t>.<body>">
//! ```

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "Intake-Signature";

/// Oldest signature a receiver should accept (5 minutes).
pub const MAX_SIGNATURE_AGE_SECS: i64 = 300;

/// Clock skew tolerance for signatures from the future.
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Malformed signature header: {0}")]
    Malformed(&'static str),

    #[error("Signature timestamp outside the accepted window")]
    Stale,

    #[error("Signature does not match payload")]
    Mismatch,
}

/// Signs outgoing intake requests with a shared secret.
#[derive(Clone)]
pub struct IntakeSigner {
    secret: SecretString,
}

impl IntakeSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self, timestamp: i64, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac
    }

    /// Hex-encoded signature of `"<timestamp>.<body>"`.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        hex::encode(self.mac(timestamp, body).finalize().into_bytes())
    }

    /// Full header value for a request sent at `timestamp`.
    pub fn header_value(&self, timestamp: i64, body: &[u8]) -> String {
        format!("t={},v1={}", timestamp, self.sign(timestamp, body))
    }

    /// Check a received header against the body, for intake receivers.
    ///
    /// `now` is the receiver's clock in unix seconds.
    pub fn verify(&self, header: &str, body: &[u8], now: i64) -> Result<(), SignatureError> {
        let (timestamp, provided) = parse_header(header)?;

        let age = now - timestamp;
        if age > MAX_SIGNATURE_AGE_SECS || age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                signature_timestamp = timestamp,
                current_time = now,
                "Intake signature outside accepted window"
            );
            return Err(SignatureError::Stale);
        }

        let expected = self.mac(timestamp, body).finalize().into_bytes();
        if expected.as_slice().ct_eq(&provided).unwrap_u8() != 1 {
            return Err(SignatureError::Mismatch);
        }
        Ok(())
    }
}

fn parse_header(header: &str) -> Result<(i64, Vec<u8>), SignatureError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        let (key, value) = part
            .split_once('=')
            .ok_or(SignatureError::Malformed("expected key=value pairs"))?;
        match key.trim() {
            "t" => {
                timestamp = Some(
                    value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| SignatureError::Malformed("invalid timestamp"))?,
                )
            }
            "v1" => {
                signature = Some(
                    hex::decode(value.trim())
                        .map_err(|_| SignatureError::Malformed("signature is not hex"))?,
                )
            }
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(sig)) => Ok((t, sig)),
        (None, _) => Err(SignatureError::Malformed("missing timestamp")),
        (_, None) => Err(SignatureError::Malformed("missing v1 signature")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_767_225_600;

    fn signer() -> IntakeSigner {
        IntakeSigner::new(SecretString::new("intake_secret".to_string()))
    }

    #[test]
    fn signature_is_stable_hex_sha256() {
        let sig = signer().sign(NOW, b"{}");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sig, signer().sign(NOW, b"{}"));
    }

    #[test]
    fn signature_depends_on_timestamp_and_body() {
        let s = signer();
        assert_ne!(s.sign(NOW, b"{}"), s.sign(NOW + 1, b"{}"));
        assert_ne!(s.sign(NOW, b"{}"), s.sign(NOW, b"[]"));
    }

    #[test]
    fn header_round_trips_through_verify() {
        let body = br#"{"email":"ops@example.com"}"#;
        let header = signer().header_value(NOW, body);
        assert!(header.starts_with(&format!("t={},v1=", NOW)));
        assert_eq!(signer().verify(&header, body, NOW + 10), Ok(()));
    }

    #[test]
    fn tampered_body_fails() {
        let header = signer().header_value(NOW, b"original");
        assert_eq!(
            signer().verify(&header, b"tampered", NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn different_secret_fails() {
        let header = signer().header_value(NOW, b"body");
        let other = IntakeSigner::new(SecretString::new("other".to_string()));
        assert_eq!(other.verify(&header, b"body", NOW), Err(SignatureError::Mismatch));
    }

    #[test]
    fn old_and_future_signatures_are_stale() {
        let s = signer();
        let old = s.header_value(NOW - MAX_SIGNATURE_AGE_SECS - 1, b"body");
        assert_eq!(s.verify(&old, b"body", NOW), Err(SignatureError::Stale));

        let future = s.header_value(NOW + 120, b"body");
        assert_eq!(s.verify(&future, b"body", NOW), Err(SignatureError::Stale));
    }

    #[test]
    fn malformed_headers_rejected() {
        let s = signer();
        for header in ["", "garbage", "t=abc,v1=00", "t=1", "v1=00", "t=1,v1=zz"] {
            assert!(
                matches!(s.verify(header, b"", NOW), Err(SignatureError::Malformed(_))),
                "{:?} should be malformed",
                header
            );
        }
    }
}
