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

//! Wire structures from [RFC 3161 §2.4].
//!
//! [RFC 3161 §2.4]: https://datatracker.ietf.org/doc/html/rfc3161#section-2.4

use der::{
    asn1::{BitString, GeneralizedTime, ObjectIdentifier, OctetString, Uint},
    Any, Sequence,
};
use x509_cert::ext::Extensions;
use x509_cert::spki::AlgorithmIdentifierOwned;

/// RFC 3161 `TimeStampReq`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TimeStampReq {
    /// Always 1.
    pub version: u8,

    /// The digest to be time-stamped.
    pub message_imprint: MessageImprint,

    /// TSA policy under which the token should be provided.
    #[asn1(optional = "true")]
    pub req_policy: Option<ObjectIdentifier>,

    /// Large random number the TSA must echo verbatim.
    #[asn1(optional = "true")]
    pub nonce: Option<Uint>,

    /// Whether the TSA must include its signing certificate.
    #[asn1(default = "Default::default")]
    pub cert_req: bool,

    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub extensions: Option<Extensions>,
}

/// RFC 3161 `MessageImprint`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct MessageImprint {
    pub hash_algorithm: AlgorithmIdentifierOwned,
    pub hashed_message: OctetString,
}

/// RFC 3161 `TimeStampResp`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TimeStampResp {
    pub status: PkiStatusInfo,

    /// The CMS `ContentInfo` carrying the token, captured unparsed so
    /// the exact token bytes survive for digesting and auditing.
    #[asn1(optional = "true")]
    pub time_stamp_token: Option<Any>,
}

/// RFC 3161 `PKIStatusInfo`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct PkiStatusInfo {
    pub status: u8,

    /// PKIFreeText: human-readable reasons from the TSA.
    #[asn1(optional = "true")]
    pub status_string: Option<Vec<String>>,

    #[asn1(optional = "true")]
    pub fail_info: Option<BitString>,
}

/// RFC 3161 `TSTInfo` as signed by the TSA.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TstInfo {
    /// Always 1.
    pub version: u8,

    /// Policy under which the token was issued.
    pub policy: ObjectIdentifier,

    /// Must match the imprint from the request.
    pub message_imprint: MessageImprint,

    /// Unique per TSA.
    pub serial_number: Uint,

    /// Generation time, always expressed in UTC.
    pub gen_time: GeneralizedTime,

    #[asn1(optional = "true")]
    pub accuracy: Option<Accuracy>,

    #[asn1(default = "Default::default")]
    pub ordering: bool,

    /// Echo of the request nonce.
    #[asn1(optional = "true")]
    pub nonce: Option<Uint>,

    /// `[0] EXPLICIT GeneralName`, parsed lazily since most TSAs omit
    /// it.
    #[asn1(context_specific = "0", optional = "true")]
    pub tsa: Option<Any>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub extensions: Option<Extensions>,
}

/// RFC 3161 `Accuracy`.
///
/// Fields are decoded signed so that a bogus negative component is
/// surfaced by the temporal validity check rather than as a decode
/// error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Sequence)]
pub struct Accuracy {
    #[asn1(optional = "true")]
    pub seconds: Option<i64>,

    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub millis: Option<i32>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub micros: Option<i32>,
}
