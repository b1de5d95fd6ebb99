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

//! Certificate chain validation at token generation time.

use chrono::{DateTime, Utc};
use der::{asn1::ObjectIdentifier, Decode};
use x509_parser::{certificate::X509Certificate, prelude::FromDer, time::ASN1Time};

use crate::{
    asn1::rfc4055::RsaPssParams, error::RejectionReason, oids::RSA_PSS_OID,
    raw_signature::validator_for_sig_and_hash_algs,
};

/// Maximum number of links walked from the signing certificate before
/// the chain is rejected.
const MAX_CHAIN_DEPTH: usize = 6;

/// Verify that `signer_cert_der` chains to one of `anchor_ders`,
/// checking every link's signature and validity window at
/// `signing_time`.
///
/// `chain_der` holds the intermediates the TSA presented; order is not
/// assumed.
pub(crate) fn check_certificate_chain(
    signer_cert_der: &[u8],
    chain_der: &[Vec<u8>],
    anchor_ders: &[Vec<u8>],
    signing_time: DateTime<Utc>,
) -> Result<(), RejectionReason> {
    let at = ASN1Time::from_timestamp(signing_time.timestamp()).map_err(|_| {
        RejectionReason::ChainInvalid {
            detail: "signing time not representable".to_string(),
        }
    })?;

    let anchors = parse_all(anchor_ders)?;
    let intermediates = parse_all(chain_der)?;

    let (_, leaf) =
        X509Certificate::from_der(signer_cert_der).map_err(|e| RejectionReason::ChainInvalid {
            detail: format!("signing certificate unparseable: {e}"),
        })?;

    let mut current = leaf;
    let mut walked: Vec<&[u8]> = vec![signer_cert_der];

    for _depth in 0..MAX_CHAIN_DEPTH {
        if !current.validity().is_valid_at(at) {
            return Err(RejectionReason::ChainInvalid {
                detail: format!(
                    "certificate {subject} not valid at token generation time",
                    subject = current.subject()
                ),
            });
        }

        // Anchors end the walk.
        if let Some(anchor) = anchors
            .iter()
            .find(|anchor| anchor.subject().as_raw() == current.issuer().as_raw())
        {
            verify_link_signature(&current, anchor)?;

            if !anchor.validity().is_valid_at(at) {
                return Err(RejectionReason::ChainInvalid {
                    detail: format!(
                        "trust anchor {subject} not valid at token generation time",
                        subject = anchor.subject()
                    ),
                });
            }

            return Ok(());
        }

        // A self-signed certificate that is not an anchor terminates the
        // walk without trust.
        if current.subject().as_raw() == current.issuer().as_raw() {
            return Err(RejectionReason::ChainInvalid {
                detail: format!(
                    "chain ends at untrusted self-signed certificate {subject}",
                    subject = current.subject()
                ),
            });
        }

        let issuer = intermediates.iter().enumerate().find(|(i, cand)| {
            cand.subject().as_raw() == current.issuer().as_raw()
                && !walked.contains(&chain_der[*i].as_slice())
        });

        match issuer {
            Some((i, issuer_cert)) => {
                verify_link_signature(&current, issuer_cert)?;
                walked.push(chain_der[i].as_slice());
                current = issuer_cert.clone();
            }
            None => {
                return Err(RejectionReason::ChainInvalid {
                    detail: format!(
                        "no issuer found for {subject}",
                        subject = current.subject()
                    ),
                });
            }
        }
    }

    Err(RejectionReason::ChainInvalid {
        detail: format!("chain exceeds {MAX_CHAIN_DEPTH} links"),
    })
}

fn parse_all(ders: &[Vec<u8>]) -> Result<Vec<X509Certificate<'_>>, RejectionReason> {
    ders.iter()
        .map(|der| {
            X509Certificate::from_der(der)
                .map(|(_, cert)| cert)
                .map_err(|e| RejectionReason::ChainInvalid {
                    detail: format!("certificate unparseable: {e}"),
                })
        })
        .collect()
}

fn verify_link_signature(
    child: &X509Certificate<'_>,
    issuer: &X509Certificate<'_>,
) -> Result<(), RejectionReason> {
    let sig_alg = child.signature_algorithm.algorithm.to_id_string();
    let sig_oid = sig_alg
        .parse::<ObjectIdentifier>()
        .map_err(|_| RejectionReason::ChainInvalid {
            detail: format!("unrecognized signature algorithm {sig_alg}"),
        })?;

    // For id-RSASSA-PSS the digest travels in the algorithm parameters;
    // every other supported algorithm names its digest in the OID
    // itself.
    let hash_oid = if sig_oid == RSA_PSS_OID {
        pss_hash_algorithm(child)?
    } else {
        sig_oid
    };

    let validator = validator_for_sig_and_hash_algs(&sig_oid, &hash_oid).ok_or_else(|| {
        RejectionReason::ChainInvalid {
            detail: format!("unsupported signature algorithm {sig_alg}"),
        }
    })?;

    validator
        .validate(
            child.signature_value.data.as_ref(),
            child.tbs_certificate.as_ref(),
            issuer.public_key().raw,
        )
        .map_err(|e| RejectionReason::ChainInvalid {
            detail: format!(
                "signature on {subject} does not verify: {e}",
                subject = child.subject()
            ),
        })
}

/// Extract the digest OID from the `RSASSA-PSS-params` of a
/// PSS-signed certificate.
fn pss_hash_algorithm(child: &X509Certificate<'_>) -> Result<ObjectIdentifier, RejectionReason> {
    use asn1_rs::ToDer;

    let params = child.signature_algorithm.parameters.as_ref().ok_or_else(|| {
        RejectionReason::ChainInvalid {
            detail: "RSASSA-PSS signature carries no parameters".to_string(),
        }
    })?;

    let params_der = params
        .to_der_vec()
        .map_err(|e| RejectionReason::ChainInvalid {
            detail: format!("RSASSA-PSS parameters unreadable: {e}"),
        })?;

    let pss = RsaPssParams::from_der(&params_der).map_err(|e| RejectionReason::ChainInvalid {
        detail: format!("RSASSA-PSS parameters malformed: {e}"),
    })?;

    Ok(pss.hash_algorithm.oid)
}
