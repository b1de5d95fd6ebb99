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

//! Error types for time-stamp request building and token validation.

/// Describes errors that can occur when building a time-stamp request,
/// decoding a response, or validating a token.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum TspError {
    /// Caller-supplied parameters were unacceptable (bad digest length,
    /// nonce out of range, malformed OID, and so on).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request, response, or token could not be decoded as DER.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// The token failed one of the validation checks.
    #[error("token rejected: {0}")]
    Rejected(#[from] RejectionReason),

    /// The tenant's trust configuration is unusable (for example, no
    /// parseable trust anchors). Distinct from [`TspError::Rejected`]:
    /// this is an operator problem, not a token problem.
    #[error("trust configuration error: {0}")]
    TrustConfiguration(String),

    /// An HTTP exchange with the TSA failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// An unexpected internal error.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<der::Error> for TspError {
    fn from(err: der::Error) -> Self {
        Self::MalformedEncoding(err.to_string())
    }
}

/// The reason a time-stamp token was rejected, in check order.
///
/// Each variant maps to a stable machine-readable code (see
/// [`RejectionReason::code`]) suitable for audit logs and API surfaces.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RejectionReason {
    /// The response status was not `granted` or `grantedWithMods`.
    #[error("TSA returned status {status}: {detail}")]
    StatusNotGranted {
        /// Numeric PKIStatus from the response.
        status: u8,

        /// Status string and failure info reported by the TSA, if any.
        detail: String,
    },

    /// The message imprint in the token differs from the one requested.
    #[error("message imprint does not match the requested imprint")]
    ImprintMismatch,

    /// The nonce echoed in the token differs from the one sent (or was
    /// absent when one was sent).
    #[error("nonce was not echoed correctly")]
    NonceMismatch,

    /// The token was issued under a policy the tenant does not accept.
    #[error("policy {policy} is not accepted by this tenant")]
    PolicyNotAccepted {
        /// The policy OID the token was issued under.
        policy: String,
    },

    /// The generation time or accuracy failed the temporal checks.
    #[error("generation time unacceptable: {detail}")]
    TimeOutOfRange {
        /// Which temporal check failed.
        detail: String,
    },

    /// The (TSA, serial) pair was already recorded with a different
    /// token.
    #[error("serial {serial} from {tsa} was already accepted")]
    ReplayedSerial {
        /// Identity of the issuing TSA.
        tsa: String,

        /// The reused serial number.
        serial: u64,
    },

    /// The signing certificate does not chain to a tenant trust anchor.
    #[error("certificate chain invalid: {detail}")]
    ChainInvalid {
        /// Which link or property failed.
        detail: String,
    },

    /// The signing certificate lacks a critical timestamping EKU.
    #[error("signing certificate lacks a critical timestamping EKU")]
    EkuMissingOrNotCritical,

    /// The ESSCertIDv2 hash does not match the presented signing
    /// certificate.
    #[error("ESSCertIDv2 does not match the signing certificate")]
    EssCertIdMismatch,

    /// The CMS signature over the signed attributes did not verify.
    #[error("signature verification failed: {detail}")]
    SignatureInvalid {
        /// Why the signature could not be verified.
        detail: String,
    },
}

impl RejectionReason {
    /// Stable machine-readable code for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StatusNotGranted { .. } => "status-not-granted",
            Self::ImprintMismatch => "imprint-mismatch",
            Self::NonceMismatch => "nonce-mismatch",
            Self::PolicyNotAccepted { .. } => "policy-not-accepted",
            Self::TimeOutOfRange { .. } => "time-out-of-range",
            Self::ReplayedSerial { .. } => "replayed-serial",
            Self::ChainInvalid { .. } => "chain-invalid",
            Self::EkuMissingOrNotCritical => "eku-missing-or-not-critical",
            Self::EssCertIdMismatch => "esscertid-mismatch",
            Self::SignatureInvalid { .. } => "signature-invalid",
        }
    }
}
