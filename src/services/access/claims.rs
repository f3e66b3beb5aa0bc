//! Claim decoding for compact JWS tokens, WITHOUT signature verification.
//!
//! This module only looks at the shape of a token: three dot-separated
//! segments, a JOSE header naming a known `alg`, and a payload that decodes to
//! a JSON object. The signature segment is never read, and `exp`/`nbf` are not
//! checked. Whatever comes out of here is self-asserted by the caller.

use std::str::FromStr;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

// Unpadded base64url that tolerates non-zero trailing bits in the last symbol.
const SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token must have 3 segments, got {0}")]
    Segments(usize),
    #[error("header is not base64url: {0}")]
    HeaderEncoding(#[source] base64::DecodeError),
    #[error("header is not a JOSE header: {0}")]
    HeaderJson(#[source] serde_json::Error),
    #[error("unsupported alg: {0}")]
    UnsupportedAlg(String),
    #[error("payload is not base64url: {0}")]
    PayloadEncoding(#[source] base64::DecodeError),
    #[error("payload is not a JSON object: {0}")]
    PayloadJson(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct JoseHeader {
    alg: String,
}

/// Decoded (unverified) token payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Decodes the claim set of a compact token.
    pub fn decode_unverified(token: &str) -> Result<Self, DecodeError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, _signature] = segments[..] else {
            return Err(DecodeError::Segments(segments.len()));
        };

        let header = SEGMENT
            .decode(header)
            .map_err(DecodeError::HeaderEncoding)?;
        let header: JoseHeader =
            serde_json::from_slice(&header).map_err(DecodeError::HeaderJson)?;
        if !alg_is_known(&header.alg) {
            return Err(DecodeError::UnsupportedAlg(header.alg));
        }

        let payload = SEGMENT
            .decode(payload)
            .map_err(DecodeError::PayloadEncoding)?;

        serde_json::from_slice(&payload).map_err(DecodeError::PayloadJson)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// The JWS names registered by common JWT parsers: everything
// `jsonwebtoken::Algorithm` knows, plus ES512 and `none`. The signature is
// ignored anyway.
fn alg_is_known(alg: &str) -> bool {
    Algorithm::from_str(alg).is_ok() || matches!(alg, "none" | "ES512")
}
