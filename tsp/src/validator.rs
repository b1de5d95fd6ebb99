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

//! Validation of decoded time-stamp tokens.
//!
//! Checks run cheapest-first so a forged or misdirected token is
//! rejected before any certificate or signature work happens:
//! response status, message imprint, nonce echo, policy, temporal
//! validity, serial uniqueness, certificate chain, timestamping EKU,
//! ESSCertIDv2 binding, and finally the CMS signature itself.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use tsp_status_tracker::{log_item, validation_codes::*, StatusTracker};

use crate::{
    chain::check_certificate_chain,
    error::{RejectionReason, TspError},
    internal::{minimal_unsigned, time::utc_now},
    oids::DigestAlgorithm,
    policy::TenantTsaPolicy,
    raw_signature::validator_for_sig_and_hash_algs,
    registry::{SerialDisposition, SerialRegistry},
    request::MessageImprint,
    token::{Accuracy, TimeStampToken},
};

/// Tunable limits for the temporal validity check.
#[derive(Clone, Copy, Debug)]
pub struct ValidationOptions {
    /// How far in the future a `genTime` may lie before it is rejected,
    /// to absorb clock drift between the TSA and this host.
    pub max_future_skew: Duration,

    /// Tokens claiming to predate this year are rejected outright.
    pub min_year: i32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_future_skew: Duration::minutes(5),
            min_year: 2000,
        }
    }
}

/// Everything a caller needs to persist as a non-repudiation record
/// once a token validates.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TimestampRecord {
    /// Token generation time, UTC.
    pub gen_time: DateTime<Utc>,

    /// Declared TSA clock accuracy, if any.
    pub accuracy: Option<Accuracy>,

    /// Policy OID the token was issued under.
    pub policy: String,

    /// Identity of the issuing TSA.
    pub tsa_id: String,

    /// Token serial number.
    pub serial: u64,
}

/// Outcome of validating one token.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TsaVerificationResult {
    /// True when every check passed.
    pub valid: bool,

    /// Machine-readable code for the first failed check.
    pub failure_code: Option<String>,

    /// Human-readable reason for the first failed check.
    pub failure_reason: Option<String>,

    /// Present only when `valid`.
    pub record: Option<TimestampRecord>,
}

impl TsaVerificationResult {
    fn valid(record: TimestampRecord) -> Self {
        Self {
            valid: true,
            failure_code: None,
            failure_reason: None,
            record: Some(record),
        }
    }

    fn rejected(reason: &RejectionReason) -> Self {
        Self {
            valid: false,
            failure_code: Some(reason.code().to_string()),
            failure_reason: Some(reason.to_string()),
            record: None,
        }
    }
}

/// A `TokenValidator` runs the full check sequence against tokens,
/// using an injected [`SerialRegistry`] for replay detection.
pub struct TokenValidator<'a> {
    registry: &'a dyn SerialRegistry,
    options: ValidationOptions,
}

impl<'a> TokenValidator<'a> {
    /// Create a validator with default [`ValidationOptions`].
    pub fn new(registry: &'a dyn SerialRegistry) -> Self {
        Self {
            registry,
            options: ValidationOptions::default(),
        }
    }

    /// Create a validator with explicit limits.
    pub fn with_options(registry: &'a dyn SerialRegistry, options: ValidationOptions) -> Self {
        Self { registry, options }
    }

    /// Validate `token` against what the caller asked for and the
    /// tenant's trust policy.
    ///
    /// `expected_nonce` must be the nonce sent in the request, or
    /// `None` when none was sent. Check failures land in the returned
    /// [`TsaVerificationResult`]; only configuration and internal
    /// problems surface as `Err`.
    pub fn validate_token(
        &self,
        token: &TimeStampToken,
        expected_imprint: &MessageImprint,
        expected_nonce: Option<&[u8]>,
        policy: &TenantTsaPolicy,
        validation_log: &mut StatusTracker,
    ) -> Result<TsaVerificationResult, TspError> {
        match self.run_checks(token, expected_imprint, expected_nonce, policy, validation_log) {
            Ok(record) => {
                log_item!(
                    record.tsa_id.clone(),
                    "time-stamp token validated",
                    "validate_token"
                )
                .validation_status(TIMESTAMP_VALIDATED)
                .success(validation_log);

                Ok(TsaVerificationResult::valid(record))
            }
            Err(CheckFailure::Rejected(reason)) => Ok(TsaVerificationResult::rejected(&reason)),
            Err(CheckFailure::Fatal(err)) => Err(err),
        }
    }

    fn run_checks(
        &self,
        token: &TimeStampToken,
        expected_imprint: &MessageImprint,
        expected_nonce: Option<&[u8]>,
        policy: &TenantTsaPolicy,
        validation_log: &mut StatusTracker,
    ) -> Result<TimestampRecord, CheckFailure> {
        // 1. Response status.
        if !token.status.is_granted() {
            let reason = RejectionReason::StatusNotGranted {
                status: token.status.status,
                detail: token.status.detail.clone(),
            };
            log_item!(
                "TimeStampToken",
                "response status was not granted",
                "check_status"
            )
            .validation_status(TIMESTAMP_NOT_GRANTED)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 2. Message imprint.
        if token.tst_info.message_imprint != *expected_imprint {
            let reason = RejectionReason::ImprintMismatch;
            log_item!(
                "TimeStampToken",
                "token imprint differs from the requested imprint",
                "check_imprint"
            )
            .validation_status(TIMESTAMP_MISMATCH)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 3. Nonce echo.
        if let Some(expected) = expected_nonce {
            let echoed = token.tst_info.nonce.as_deref();
            if echoed != Some(minimal_unsigned(expected)) {
                let reason = RejectionReason::NonceMismatch;
                log_item!(
                    "TimeStampToken",
                    "nonce was not echoed correctly",
                    "check_nonce"
                )
                .validation_status(TIMESTAMP_NONCE_MISMATCH)
                .failure_no_throw(validation_log, &reason);
                return Err(reason.into());
            }
        }

        // 4. Policy acceptance.
        let token_policy = token.tst_info.policy.to_string();
        if !policy.accepts_policy(&token_policy) {
            let reason = RejectionReason::PolicyNotAccepted {
                policy: token_policy,
            };
            log_item!(
                "TimeStampToken",
                "token policy not accepted by tenant",
                "check_policy"
            )
            .validation_status(TIMESTAMP_POLICY_DENIED)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 5. Temporal validity.
        if let Err(reason) = self.check_temporal(token) {
            log_item!(
                "TimeStampToken",
                "generation time outside acceptable window",
                "check_temporal"
            )
            .validation_status(TIMESTAMP_OUTSIDE_VALIDITY)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 6. Serial uniqueness. The TSA identity keys the registry, so
        // two different TSAs may legitimately issue the same serial.
        let tsa_id = token
            .tsa_identity()
            .map_err(|e| RejectionReason::ChainInvalid {
                detail: e.to_string(),
            })?;

        if self.registry.check_and_insert(
            &tsa_id,
            token.tst_info.serial,
            &token.token_digest,
        ) == SerialDisposition::Duplicate
        {
            let reason = RejectionReason::ReplayedSerial {
                tsa: tsa_id.clone(),
                serial: token.tst_info.serial,
            };
            log_item!(
                tsa_id.clone(),
                "serial number already accepted from this TSA",
                "check_serial"
            )
            .validation_status(TIMESTAMP_REPLAYED)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 7. Certificate chain at genTime.
        let anchor_ders = policy.all_anchor_ders().map_err(CheckFailure::Fatal)?;

        if let Err(reason) = check_certificate_chain(
            &token.signer_cert_der,
            &token.chain_der,
            &anchor_ders,
            token.tst_info.gen_time,
        ) {
            log_item!(
                tsa_id.clone(),
                "certificate chain does not reach a trust anchor",
                "check_chain"
            )
            .validation_status(TIMESTAMP_UNTRUSTED)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        log_item!(tsa_id.clone(), "certificate chain trusted", "check_chain")
            .validation_status(TIMESTAMP_TRUSTED)
            .success(validation_log);

        // 8. Critical timestamping EKU.
        if let Err(reason) = check_timestamping_eku(&token.signer_cert_der, policy) {
            log_item!(
                tsa_id.clone(),
                "signing certificate unsuitable for time-stamping",
                "check_eku"
            )
            .validation_status(SIGNING_CREDENTIAL_INVALID)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // 9. ESSCertIDv2 binding.
        if let Err(reason) = check_ess_cert_id(token) {
            log_item!(
                tsa_id.clone(),
                "ESSCertIDv2 does not bind the signing certificate",
                "check_ess_cert_id"
            )
            .validation_status(SIGNING_CREDENTIAL_MISMATCH)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        // Signature verification, most expensive last.
        if let Err(reason) = verify_signature(token) {
            log_item!(
                tsa_id.clone(),
                "CMS signature did not verify",
                "verify_signature"
            )
            .validation_status(TIMESTAMP_SIGNATURE_INVALID)
            .failure_no_throw(validation_log, &reason);
            return Err(reason.into());
        }

        Ok(TimestampRecord {
            gen_time: token.tst_info.gen_time,
            accuracy: token.tst_info.accuracy,
            policy: token_policy,
            tsa_id,
            serial: token.tst_info.serial,
        })
    }

    fn check_temporal(&self, token: &TimeStampToken) -> Result<(), RejectionReason> {
        let gen_time = token.tst_info.gen_time;
        let now = utc_now();

        if gen_time > now + self.options.max_future_skew {
            return Err(RejectionReason::TimeOutOfRange {
                detail: format!(
                    "genTime {gen_time} is further in the future than the allowed skew"
                ),
            });
        }

        if gen_time.year() < self.options.min_year {
            return Err(RejectionReason::TimeOutOfRange {
                detail: format!(
                    "genTime {gen_time} predates the year floor {year}",
                    year = self.options.min_year
                ),
            });
        }

        if let Some(accuracy) = &token.tst_info.accuracy {
            if !accuracy.is_non_negative() {
                return Err(RejectionReason::TimeOutOfRange {
                    detail: "accuracy has a negative component".to_string(),
                });
            }
        }

        Ok(())
    }
}

enum CheckFailure {
    Rejected(RejectionReason),
    Fatal(TspError),
}

impl From<RejectionReason> for CheckFailure {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected(reason)
    }
}

/// The signing certificate must carry an Extended Key Usage extension
/// that is marked critical and names an EKU the policy requires
/// (id-kp-timeStamping unless an anchor set overrides it).
fn check_timestamping_eku(
    signer_cert_der: &[u8],
    policy: &TenantTsaPolicy,
) -> Result<(), RejectionReason> {
    use x509_parser::extensions::ParsedExtension;

    let (_, cert) = x509_parser::parse_x509_certificate(signer_cert_der).map_err(|e| {
        RejectionReason::ChainInvalid {
            detail: format!("signing certificate unparseable: {e}"),
        }
    })?;

    let required: Vec<&str> = policy
        .trust_anchors
        .iter()
        .map(|anchor| anchor.required_eku.as_str())
        .collect();

    for ext in cert.extensions() {
        if let ParsedExtension::ExtendedKeyUsage(eku) = ext.parsed_extension() {
            if !ext.critical {
                return Err(RejectionReason::EkuMissingOrNotCritical);
            }

            let satisfied = required.iter().any(|oid| {
                (*oid == crate::oids::TIMESTAMPING_EKU_OID.to_string() && eku.time_stamping)
                    || eku.other.iter().any(|o| o.to_id_string() == *oid)
            });

            return if satisfied {
                Ok(())
            } else {
                Err(RejectionReason::EkuMissingOrNotCritical)
            };
        }
    }

    Err(RejectionReason::EkuMissingOrNotCritical)
}

/// The first `ESSCertIDv2` entry must hash the signing certificate with
/// a SHA-2 algorithm. SHA-1 hashes (including the whole v1 attribute)
/// never match.
fn check_ess_cert_id(token: &TimeStampToken) -> Result<(), RejectionReason> {
    let Some(cert_hash) = token.signing_cert_hashes.first() else {
        return Err(RejectionReason::EssCertIdMismatch);
    };

    let Some(alg) = DigestAlgorithm::from_oid(&cert_hash.algorithm) else {
        return Err(RejectionReason::EssCertIdMismatch);
    };

    if alg.digest(&token.signer_cert_der) != cert_hash.value {
        return Err(RejectionReason::EssCertIdMismatch);
    }

    Ok(())
}

/// Verify the CMS signature over the signed attributes, after
/// confirming the signed `message-digest` attribute actually covers the
/// `TSTInfo` content.
fn verify_signature(token: &TimeStampToken) -> Result<(), RejectionReason> {
    let Some(digest_alg) = DigestAlgorithm::from_oid(&token.digest_algorithm) else {
        return Err(RejectionReason::SignatureInvalid {
            detail: format!(
                "unsupported digest algorithm {oid}",
                oid = token.digest_algorithm
            ),
        });
    };

    if digest_alg.digest(&token.tst_info_der) != token.message_digest {
        return Err(RejectionReason::SignatureInvalid {
            detail: "message-digest attribute does not cover the TSTInfo content".to_string(),
        });
    }

    let validator = validator_for_sig_and_hash_algs(&token.signature_algorithm, &token.digest_algorithm)
        .ok_or_else(|| RejectionReason::SignatureInvalid {
            detail: format!(
                "unsupported signature algorithm {oid}",
                oid = token.signature_algorithm
            ),
        })?;

    let (_, cert) = x509_parser::parse_x509_certificate(&token.signer_cert_der).map_err(|e| {
        RejectionReason::SignatureInvalid {
            detail: format!("signing certificate unparseable: {e}"),
        }
    })?;

    validator
        .validate(
            &token.signature,
            &token.signed_attrs_der,
            cert.public_key().raw,
        )
        .map_err(|e| RejectionReason::SignatureInvalid {
            detail: e.to_string(),
        })
}
