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

//! Machine-readable status codes reported while validating a time-stamp
//! token.
//!
//! Each code names the check that produced it; the corresponding
//! [`LogItem`](crate::LogItem) carries the human-readable detail.

use crate::LogKind;

// -- success codes --

/// The time-stamp token is well-formed and every check passed, including
/// signature verification.
pub const TIMESTAMP_VALIDATED: &str = "timeStamp.validated";

/// The TSA's certificate chains to a configured trust anchor.
pub const TIMESTAMP_TRUSTED: &str = "timeStamp.trusted";

// -- failure codes --

/// The response status was not `granted` or `grantedWithMods`.
pub const TIMESTAMP_NOT_GRANTED: &str = "timeStamp.notGranted";

/// The response or token could not be decoded.
pub const TIMESTAMP_MALFORMED: &str = "timeStamp.malformed";

/// The message imprint in the token does not match the imprint that was
/// requested.
pub const TIMESTAMP_MISMATCH: &str = "timeStamp.mismatch";

/// The nonce echoed in the token does not match the nonce that was sent.
pub const TIMESTAMP_NONCE_MISMATCH: &str = "timeStamp.nonceMismatch";

/// The TSA policy under which the token was issued is not accepted by
/// the tenant.
pub const TIMESTAMP_POLICY_DENIED: &str = "timeStamp.policyDenied";

/// The token's generation time falls outside the acceptable window, or
/// its accuracy fields are malformed.
pub const TIMESTAMP_OUTSIDE_VALIDITY: &str = "timeStamp.outsideValidity";

/// The token's serial number was already seen from the same TSA.
pub const TIMESTAMP_REPLAYED: &str = "timeStamp.replayed";

/// The TSA's certificate does not chain to a configured trust anchor.
pub const TIMESTAMP_UNTRUSTED: &str = "timeStamp.untrusted";

/// The token's signature does not verify over its signed attributes.
pub const TIMESTAMP_SIGNATURE_INVALID: &str = "timeStamp.signatureInvalid";

/// The TSA's signing certificate is unsuitable for time-stamping (for
/// example, the timestamping EKU is absent or not marked critical).
pub const SIGNING_CREDENTIAL_INVALID: &str = "signingCredential.invalid";

/// The ESSCertIDv2 hash in the signed attributes does not match the
/// signing certificate that was presented.
pub const SIGNING_CREDENTIAL_MISMATCH: &str = "signingCredential.mismatch";

/// Returns the [`LogKind`] that should be used for a given status code.
pub fn log_kind(status: &str) -> LogKind {
    match status {
        TIMESTAMP_VALIDATED | TIMESTAMP_TRUSTED => LogKind::Success,
        _ => LogKind::Failure,
    }
}
