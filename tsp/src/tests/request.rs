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

use sha2::{Digest, Sha256};

use crate::{
    error::TspError,
    oids::DigestAlgorithm,
    request::{
        build_request, decode_request, encode_request, generate_nonce, MessageImprint,
        DEFAULT_NONCE_LEN, MAX_NONCE_LEN, MIN_NONCE_LEN,
    },
};

const TEST_POLICY: &str = "1.3.6.1.4.1.57264.99.1";

fn sha256_imprint() -> Vec<u8> {
    Sha256::digest(b"hello").to_vec()
}

#[test]
fn defaults() {
    let imprint = sha256_imprint();
    let req = build_request(&imprint, None, None, None, None).unwrap();

    assert_eq!(req.message_imprint.hash_algorithm, DigestAlgorithm::Sha256.oid());
    assert_eq!(req.message_imprint.hashed_message, imprint);
    assert!(req.req_policy.is_none());
    assert!(req.nonce.is_none());
    assert!(req.cert_req);
}

#[test]
fn imprint_length_must_match_algorithm() {
    let imprint = sha256_imprint();

    assert!(matches!(
        build_request(&imprint, Some(DigestAlgorithm::Sha384), None, None, None),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn imprint_too_short() {
    assert!(matches!(
        build_request(&[0u8; 20], None, None, None, None),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn rejects_bad_policy_oid() {
    let imprint = sha256_imprint();

    assert!(matches!(
        build_request(&imprint, None, Some("not-an-oid"), None, None),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn accepts_policy_oid() {
    let imprint = sha256_imprint();
    let req = build_request(&imprint, None, Some(TEST_POLICY), None, None).unwrap();

    assert_eq!(req.req_policy.unwrap().to_string(), TEST_POLICY);
}

#[test]
fn nonce_too_short_after_stripping() {
    let imprint = sha256_imprint();

    // Twelve bytes on the wire, but only four significant.
    let nonce = [0u8, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef];

    assert!(matches!(
        build_request(&imprint, None, None, Some(&nonce), None),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn nonce_is_stored_minimally() {
    let imprint = sha256_imprint();

    let mut nonce = vec![0u8; 4];
    nonce.extend_from_slice(&[0x11u8; 12]);

    let req = build_request(&imprint, None, None, Some(&nonce), None).unwrap();

    assert_eq!(req.nonce.unwrap(), vec![0x11u8; 12]);
}

#[test]
fn generate_nonce_bounds() {
    assert_eq!(generate_nonce(DEFAULT_NONCE_LEN).unwrap().len(), DEFAULT_NONCE_LEN);
    assert_eq!(generate_nonce(MIN_NONCE_LEN).unwrap().len(), MIN_NONCE_LEN);
    assert_eq!(generate_nonce(MAX_NONCE_LEN).unwrap().len(), MAX_NONCE_LEN);

    assert!(generate_nonce(MIN_NONCE_LEN - 1).is_err());
    assert!(generate_nonce(MAX_NONCE_LEN + 1).is_err());
}

#[test]
fn generated_nonces_do_not_repeat() {
    let mut seen = std::collections::HashSet::new();

    for _ in 0..1000 {
        assert!(seen.insert(generate_nonce(DEFAULT_NONCE_LEN).unwrap()));
    }
}

#[test]
fn encode_decode_round_trip() {
    let imprint = sha256_imprint();
    let nonce = generate_nonce(DEFAULT_NONCE_LEN).unwrap();

    let req = build_request(&imprint, None, Some(TEST_POLICY), Some(&nonce), Some(true)).unwrap();

    let der = encode_request(&req).unwrap();
    let decoded = decode_request(&der).unwrap();

    assert_eq!(decoded, req);
}

#[test]
fn encoding_is_deterministic() {
    let imprint = sha256_imprint();
    let req = build_request(&imprint, None, Some(TEST_POLICY), None, None).unwrap();

    assert_eq!(encode_request(&req).unwrap(), encode_request(&req).unwrap());
}

#[test]
fn decodes_openssl_query() {
    // Produced by `query.py` for gen_fixtures.sh with a known nonce.
    let der = include_bytes!("fixtures/query_nonce.tsq");

    let req = decode_request(der).unwrap();

    assert_eq!(
        req.message_imprint,
        MessageImprint::for_message(DigestAlgorithm::Sha256, b"hello")
    );
    assert_eq!(
        req.nonce.unwrap(),
        hex::decode("4af03c2a9d6e815b7c4490d2e6f1a358").unwrap()
    );
    assert!(req.cert_req);
}
