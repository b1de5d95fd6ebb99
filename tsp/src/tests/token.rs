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

use der::{
    asn1::{GeneralizedTime, OctetString, Uint},
    Encode,
};
use sha2::{Digest, Sha256};
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::{
    asn1::rfc3161,
    error::TspError,
    oids::{DigestAlgorithm, SHA256_OID},
    request::MessageImprint,
    response::TimeStampResponse,
    token::{decode_tst_info, Accuracy, TimeStampToken},
};

fn granted_token() -> TimeStampToken {
    TimeStampResponse::from_der(include_bytes!("fixtures/resp_granted.der"))
        .unwrap()
        .token()
        .unwrap()
        .unwrap()
}

#[test]
fn tst_info_fields() {
    let token = granted_token();
    let info = &token.tst_info;

    assert_eq!(info.policy.to_string(), "1.3.6.1.4.1.57264.99.1");
    assert_eq!(
        info.message_imprint,
        MessageImprint::for_message(DigestAlgorithm::Sha256, b"hello")
    );
    assert_eq!(info.serial, 1);
    assert_eq!(
        info.accuracy,
        Some(Accuracy {
            seconds: 1,
            millis: 500,
            micros: 100
        })
    );
    assert!(info.ordering);
    assert_eq!(
        info.nonce.as_deref().unwrap(),
        hex::decode("4af03c2a9d6e815b7c4490d2e6f1a358").unwrap()
    );
    assert!(info.tsa_name.is_none());
}

#[test]
fn token_without_nonce() {
    let token = TimeStampResponse::from_der(include_bytes!("fixtures/resp_no_nonce.der"))
        .unwrap()
        .token()
        .unwrap()
        .unwrap();

    assert!(token.tst_info.nonce.is_none());
    assert_eq!(token.tst_info.serial, 2);
}

#[test]
fn signer_certificate_is_partitioned_from_chain() {
    let token = granted_token();

    let (_, signer) = x509_parser::parse_x509_certificate(&token.signer_cert_der).unwrap();
    assert!(signer.subject().to_string().contains("TSP Test TSA"));

    // The root travels in the token because certReq was TRUE and the
    // TSA config lists it.
    assert_eq!(token.chain_der.len(), 1);
    let (_, root) = x509_parser::parse_x509_certificate(&token.chain_der[0]).unwrap();
    assert!(root.subject().to_string().contains("TSP Test Root CA"));
}

#[test]
fn tsa_identity_falls_back_to_signer_subject() {
    let token = granted_token();

    let id = token.tsa_identity().unwrap();
    assert!(id.contains("TSP Test TSA"));
}

#[test]
fn signing_certificate_v2_hash_matches_signer() {
    let token = granted_token();

    let hash = token.signing_cert_hashes.first().unwrap();
    assert_eq!(hash.algorithm, SHA256_OID);
    assert_eq!(hash.value, Sha256::digest(&token.signer_cert_der).to_vec());
}

#[test]
fn message_digest_covers_tst_info() {
    let token = granted_token();

    assert_eq!(token.digest_algorithm, SHA256_OID);
    assert_eq!(
        token.message_digest,
        Sha256::digest(&token.tst_info_der).to_vec()
    );
}

#[test]
fn token_digest_is_stable() {
    let response =
        TimeStampResponse::from_der(include_bytes!("fixtures/resp_granted.der")).unwrap();

    let a = response.token().unwrap().unwrap();
    let b = response.token().unwrap().unwrap();

    assert_eq!(a.token_digest, b.token_digest);
}

#[test]
fn tokens_from_different_responses_have_different_digests() {
    let a = granted_token();
    let b = TimeStampResponse::from_der(include_bytes!("fixtures/resp_same_serial.der"))
        .unwrap()
        .token()
        .unwrap()
        .unwrap();

    assert_ne!(a.token_digest, b.token_digest);
}

#[test]
fn garbage_is_rejected() {
    assert!(TimeStampToken::from_der(b"not a token").is_err());
}

fn tst_info_with_serial(serial: &[u8]) -> Vec<u8> {
    rfc3161::TstInfo {
        version: 1,
        policy: "1.3.6.1.4.1.57264.99.1".parse().unwrap(),
        message_imprint: rfc3161::MessageImprint {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: SHA256_OID,
                parameters: None,
            },
            hashed_message: OctetString::new(vec![0u8; 32]).unwrap(),
        },
        serial_number: Uint::new(serial).unwrap(),
        gen_time: GeneralizedTime::from_unix_duration(std::time::Duration::from_secs(
            1_700_000_000,
        ))
        .unwrap(),
        accuracy: None,
        ordering: false,
        nonce: None,
        tsa: None,
        extensions: None,
    }
    .to_der()
    .unwrap()
}

#[test]
fn zero_serial_is_rejected() {
    let der = tst_info_with_serial(&[0]);

    assert!(matches!(
        decode_tst_info(&der),
        Err(TspError::MalformedEncoding(_))
    ));
}

#[test]
fn serial_wider_than_64_bits_is_rejected() {
    let der = tst_info_with_serial(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);

    assert!(matches!(
        decode_tst_info(&der),
        Err(TspError::MalformedEncoding(_))
    ));
}

#[test]
fn small_serial_decodes() {
    let der = tst_info_with_serial(&[0x2a]);

    assert_eq!(decode_tst_info(&der).unwrap().serial, 42);
}
