// Copyright 2026 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Building and encoding [RFC 3161] `TimeStampReq` messages.
//!
//! [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161

use der::{
    asn1::{ObjectIdentifier, OctetString, Uint},
    Decode, Encode,
};
use rand::{thread_rng, Rng};
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::{
    asn1::rfc3161,
    error::TspError,
    internal::minimal_unsigned,
    oids::{DigestAlgorithm, MD5_OID, SHA1_OID},
};

/// Smallest digest accepted as a message imprint (SHA-256).
pub const MIN_IMPRINT_LEN: usize = 32;

/// Largest digest accepted as a message imprint.
pub const MAX_IMPRINT_LEN: usize = 512;

/// Smallest accepted nonce, in bytes.
pub const MIN_NONCE_LEN: usize = 8;

/// Largest accepted nonce, in bytes (2^256 - 1).
pub const MAX_NONCE_LEN: usize = 32;

/// Default nonce length for [`generate_nonce`].
pub const DEFAULT_NONCE_LEN: usize = 16;

/// A digest to be time-stamped, paired with the algorithm that
/// produced it.
///
/// Equality compares the algorithm OID and the digest bytes; whether an
/// `AlgorithmIdentifier` on the wire carried absent or NULL parameters
/// does not matter, since only the OID is retained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageImprint {
    /// OID of the digest algorithm.
    pub hash_algorithm: ObjectIdentifier,

    /// The digest itself.
    pub hashed_message: Vec<u8>,
}

impl MessageImprint {
    /// Build an imprint by digesting `message` with `alg`.
    pub fn for_message(alg: DigestAlgorithm, message: &[u8]) -> Self {
        Self {
            hash_algorithm: alg.oid(),
            hashed_message: alg.digest(message),
        }
    }
}

/// A validated time-stamp request, ready to encode.
///
/// Obtain one from [`build_request`]; the fields are public so hosts
/// can log or persist what was sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeStampRequest {
    /// The imprint to be time-stamped.
    pub message_imprint: MessageImprint,

    /// Requested TSA policy, if any.
    pub req_policy: Option<ObjectIdentifier>,

    /// Nonce as a big-endian unsigned integer, if any.
    pub nonce: Option<Vec<u8>>,

    /// Whether the TSA must include its signing certificate. Without it
    /// the validator cannot run its certificate checks, so this
    /// defaults to `true`.
    pub cert_req: bool,
}

/// Validate request parameters and produce a [`TimeStampRequest`].
///
/// `hash_algorithm` defaults to SHA-256 and `cert_req` to `true` when
/// `None`. The imprint length must equal the digest length of the
/// algorithm; the nonce, when present, must be 8 to 32 bytes.
pub fn build_request(
    imprint: &[u8],
    hash_algorithm: Option<DigestAlgorithm>,
    req_policy: Option<&str>,
    nonce: Option<&[u8]>,
    cert_req: Option<bool>,
) -> Result<TimeStampRequest, TspError> {
    let alg = hash_algorithm.unwrap_or(DigestAlgorithm::Sha256);

    if imprint.len() < MIN_IMPRINT_LEN || imprint.len() > MAX_IMPRINT_LEN {
        return Err(TspError::InvalidInput(format!(
            "message imprint must be {MIN_IMPRINT_LEN}..={MAX_IMPRINT_LEN} bytes, got {n}",
            n = imprint.len()
        )));
    }

    if imprint.len() != alg.digest_len() {
        return Err(TspError::InvalidInput(format!(
            "message imprint is {n} bytes but {alg:?} digests are {m} bytes",
            n = imprint.len(),
            m = alg.digest_len()
        )));
    }

    let req_policy = match req_policy {
        Some(policy) => Some(
            policy
                .parse::<ObjectIdentifier>()
                .map_err(|_| TspError::InvalidInput(format!("invalid policy OID `{policy}`")))?,
        ),
        None => None,
    };

    let nonce = match nonce {
        Some(nonce) => {
            let minimal = minimal_unsigned(nonce);
            if minimal.len() < MIN_NONCE_LEN || minimal.len() > MAX_NONCE_LEN {
                return Err(TspError::InvalidInput(format!(
                    "nonce must be {MIN_NONCE_LEN}..={MAX_NONCE_LEN} bytes, got {n}",
                    n = minimal.len()
                )));
            }
            Some(minimal.to_vec())
        }
        None => None,
    };

    Ok(TimeStampRequest {
        message_imprint: MessageImprint {
            hash_algorithm: alg.oid(),
            hashed_message: imprint.to_vec(),
        },
        req_policy,
        nonce,
        cert_req: cert_req.unwrap_or(true),
    })
}

/// Generate a nonce of `len` bytes from the thread CSPRNG.
pub fn generate_nonce(len: usize) -> Result<Vec<u8>, TspError> {
    if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&len) {
        return Err(TspError::InvalidInput(format!(
            "nonce length must be {MIN_NONCE_LEN}..={MAX_NONCE_LEN}, got {len}"
        )));
    }

    let mut nonce = vec![0u8; len];
    thread_rng()
        .try_fill(nonce.as_mut_slice())
        .map_err(|_| TspError::InternalError("unable to generate random nonce".to_string()))?;

    Ok(nonce)
}

/// The fixed header set for a TSP-over-HTTP exchange.
///
/// The `Content-Type` is set by the transport; these are the remaining
/// headers every request carries.
pub fn request_headers() -> Vec<(String, String)> {
    vec![
        (
            "Accept".to_string(),
            "application/timestamp-reply".to_string(),
        ),
        ("Cache-Control".to_string(), "no-cache".to_string()),
        ("Pragma".to_string(), "no-cache".to_string()),
    ]
}

/// Encode a request as DER.
///
/// Encoding is deterministic: the same request always yields the same
/// bytes.
pub fn encode_request(request: &TimeStampRequest) -> Result<Vec<u8>, TspError> {
    let nonce = match &request.nonce {
        Some(nonce) => Some(Uint::new(nonce)?),
        None => None,
    };

    let wire = rfc3161::TimeStampReq {
        version: 1,
        message_imprint: rfc3161::MessageImprint {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: request.message_imprint.hash_algorithm,
                parameters: None,
            },
            hashed_message: OctetString::new(request.message_imprint.hashed_message.clone())?,
        },
        req_policy: request.req_policy,
        nonce,
        cert_req: request.cert_req,
        extensions: None,
    };

    Ok(wire.to_der()?)
}

/// Decode a DER `TimeStampReq` back into the domain representation.
pub fn decode_request(der: &[u8]) -> Result<TimeStampRequest, TspError> {
    let wire = rfc3161::TimeStampReq::from_der(der)?;

    if wire.version != 1 {
        return Err(TspError::MalformedEncoding(format!(
            "unsupported TimeStampReq version {v}",
            v = wire.version
        )));
    }

    let alg_oid = wire.message_imprint.hash_algorithm.oid;
    if alg_oid == SHA1_OID || alg_oid == MD5_OID {
        return Err(TspError::InvalidInput(format!(
            "digest algorithm {alg_oid} is not accepted"
        )));
    }

    Ok(TimeStampRequest {
        message_imprint: MessageImprint {
            hash_algorithm: alg_oid,
            hashed_message: wire.message_imprint.hashed_message.as_bytes().to_vec(),
        },
        req_policy: wire.req_policy,
        nonce: wire
            .nonce
            .map(|n| minimal_unsigned(n.as_bytes()).to_vec()),
        cert_req: wire.cert_req,
    })
}
