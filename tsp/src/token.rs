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

//! Decoding the CMS `SignedData` structure that carries a time-stamp
//! token, into the domain model the validator consumes.

use chrono::{DateTime, Utc};
use cms::{
    cert::CertificateChoices, content_info::ContentInfo, signed_data::SignedData,
    signed_data::SignerIdentifier, signed_data::SignerInfo,
};
use der::{
    asn1::{ObjectIdentifier, OctetString},
    Decode, Encode,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use x509_cert::ext::pkix::name::GeneralName;

use crate::{
    asn1::{rfc3161, rfc5035::SigningCertificateV2},
    error::TspError,
    internal::minimal_unsigned,
    oids::{CONTENT_TYPE_OID, MESSAGE_DIGEST_OID, SIGNED_DATA_OID, SIGNING_CERTIFICATE_V2_OID, TST_INFO_OID},
    request::MessageImprint,
};

/// Accuracy of a TSA's clock, as declared in the token.
///
/// Absent components decode as zero. Components are kept signed so the
/// temporal validity check can reject a negative value instead of the
/// decoder masking it.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Accuracy {
    /// Whole seconds.
    pub seconds: i64,

    /// Milliseconds (0..=999 when well-formed).
    pub millis: i32,

    /// Microseconds (0..=999 when well-formed).
    pub micros: i32,
}

impl Accuracy {
    /// True when every component is non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.seconds >= 0 && self.millis >= 0 && self.micros >= 0
    }
}

impl From<rfc3161::Accuracy> for Accuracy {
    fn from(wire: rfc3161::Accuracy) -> Self {
        Self {
            seconds: wire.seconds.unwrap_or(0),
            millis: wire.millis.unwrap_or(0),
            micros: wire.micros.unwrap_or(0),
        }
    }
}

/// The signed content of a time-stamp token (RFC 3161 `TSTInfo`),
/// converted to domain types.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TstInfo {
    /// Policy under which the token was issued.
    pub policy: ObjectIdentifier,

    /// The imprint that was time-stamped.
    pub message_imprint: MessageImprint,

    /// Serial number, unique per TSA.
    pub serial: u64,

    /// Generation time in UTC.
    pub gen_time: DateTime<Utc>,

    /// Declared clock accuracy, if any.
    pub accuracy: Option<Accuracy>,

    /// Whether tokens from this TSA are strictly ordered by `gen_time`.
    pub ordering: bool,

    /// Echoed nonce as a minimal big-endian unsigned integer, if any.
    pub nonce: Option<Vec<u8>>,

    /// The TSA's own name, when it chose to include one.
    pub tsa_name: Option<String>,
}

/// One certificate hash from the `SigningCertificateV2` attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertHash {
    /// Digest algorithm for `value`.
    pub algorithm: ObjectIdentifier,

    /// The certificate hash.
    pub value: Vec<u8>,
}

/// Status of the `TimeStampResp` a token arrived in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseStatus {
    /// Numeric `PKIStatus`.
    pub status: u8,

    /// Free-text detail from the TSA, if any.
    pub detail: String,
}

impl ResponseStatus {
    /// A synthetic `granted` status, for tokens obtained outside a
    /// `TimeStampResp` (for example, embedded in another signature).
    pub fn granted() -> Self {
        Self {
            status: 0,
            detail: String::new(),
        }
    }

    /// True for `granted` (0) and `grantedWithMods` (1).
    pub fn is_granted(&self) -> bool {
        matches!(self.status, 0 | 1)
    }
}

/// A fully decoded time-stamp token.
///
/// Everything the validator needs is captured here: the parsed
/// `TSTInfo`, the signer certificate and the rest of the presented
/// chain, the signed attributes in their signed (`SET OF`) encoding,
/// and the raw signature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeStampToken {
    /// Status of the response this token arrived in.
    pub status: ResponseStatus,

    /// The signed content.
    pub tst_info: TstInfo,

    /// Exact DER of the `TSTInfo` eContent, for the message-digest
    /// check.
    pub tst_info_der: Vec<u8>,

    /// DER of the TSA's signing certificate.
    pub signer_cert_der: Vec<u8>,

    /// DER of the other certificates the TSA presented.
    pub chain_der: Vec<Vec<u8>>,

    /// The signed attributes in the `SET OF` encoding the signature
    /// covers.
    pub signed_attrs_der: Vec<u8>,

    /// Value of the signed `message-digest` attribute.
    pub message_digest: Vec<u8>,

    /// Certificate hashes from the `SigningCertificateV2` attribute.
    /// Empty when the attribute was absent.
    pub signing_cert_hashes: Vec<CertHash>,

    /// OID of the signer's digest algorithm.
    pub digest_algorithm: ObjectIdentifier,

    /// OID of the signer's signature algorithm.
    pub signature_algorithm: ObjectIdentifier,

    /// The raw signature bytes.
    pub signature: Vec<u8>,

    /// SHA-256 over the whole token `ContentInfo`, used by the serial
    /// registry to recognize byte-identical re-presentation.
    pub token_digest: [u8; 32],
}

impl TimeStampToken {
    /// Decode a bare time-stamp token (a CMS `ContentInfo`).
    ///
    /// The response status is assumed `granted`; use
    /// [`crate::response::TimeStampResponse`] when the surrounding
    /// `TimeStampResp` is available.
    pub fn from_der(token_der: &[u8]) -> Result<Self, TspError> {
        Self::from_content_info_der(token_der, ResponseStatus::granted())
    }

    pub(crate) fn from_content_info_der(
        token_der: &[u8],
        status: ResponseStatus,
    ) -> Result<Self, TspError> {
        let ci = ContentInfo::from_der(token_der)?;

        if ci.content_type != SIGNED_DATA_OID {
            return Err(TspError::MalformedEncoding(format!(
                "expected id-signedData, found {oid}",
                oid = ci.content_type
            )));
        }

        let sd: SignedData = ci.content.decode_as()?;

        if sd.encap_content_info.econtent_type != TST_INFO_OID {
            return Err(TspError::MalformedEncoding(format!(
                "expected id-ct-TSTInfo content, found {oid}",
                oid = sd.encap_content_info.econtent_type
            )));
        }

        let econtent = sd.encap_content_info.econtent.as_ref().ok_or_else(|| {
            TspError::MalformedEncoding("token has no TSTInfo content".to_string())
        })?;
        let tst_info_der = econtent.decode_as::<OctetString>()?.as_bytes().to_vec();

        let tst_info = decode_tst_info(&tst_info_der)?;

        // RFC 3161 requires exactly one SignerInfo.
        let mut signers = sd.signer_infos.0.iter();
        let signer_info = signers
            .next()
            .ok_or_else(|| TspError::MalformedEncoding("token has no SignerInfo".to_string()))?;
        if signers.next().is_some() {
            return Err(TspError::MalformedEncoding(
                "token has more than one SignerInfo".to_string(),
            ));
        }

        let (signer_cert_der, chain_der) = partition_certificates(&sd, signer_info)?;

        let signed_attrs = signer_info.signed_attrs.as_ref().ok_or_else(|| {
            TspError::MalformedEncoding("token has no signed attributes".to_string())
        })?;

        let mut message_digest = None;
        let mut signing_cert_hashes = Vec::new();

        for attr in signed_attrs.iter() {
            if attr.oid == CONTENT_TYPE_OID {
                let content_type: ObjectIdentifier = single_attr_value(attr)?.decode_as()?;
                if content_type != TST_INFO_OID {
                    return Err(TspError::MalformedEncoding(format!(
                        "content-type attribute names {content_type}, not id-ct-TSTInfo"
                    )));
                }
            } else if attr.oid == MESSAGE_DIGEST_OID {
                let digest: OctetString = single_attr_value(attr)?.decode_as()?;
                message_digest = Some(digest.as_bytes().to_vec());
            } else if attr.oid == SIGNING_CERTIFICATE_V2_OID {
                let scv2: SigningCertificateV2 = single_attr_value(attr)?.decode_as()?;
                for cert_id in scv2.certs {
                    signing_cert_hashes.push(CertHash {
                        algorithm: cert_id.hash_algorithm.oid,
                        value: cert_id.cert_hash.as_bytes().to_vec(),
                    });
                }
            }
        }

        let message_digest = message_digest.ok_or_else(|| {
            TspError::MalformedEncoding("token has no message-digest attribute".to_string())
        })?;

        // The signature covers the SET OF encoding of the signed
        // attributes, not the [0] IMPLICIT form they travel in.
        let signed_attrs_der = signed_attrs.to_der()?;

        Ok(Self {
            status,
            tst_info,
            tst_info_der,
            signer_cert_der,
            chain_der,
            signed_attrs_der,
            message_digest,
            signing_cert_hashes,
            digest_algorithm: signer_info.digest_alg.oid,
            signature_algorithm: signer_info.signature_algorithm.oid,
            signature: signer_info.signature.as_bytes().to_vec(),
            token_digest: Sha256::digest(token_der).into(),
        })
    }

    /// Identity of the issuing TSA: the `tsa` field of the `TSTInfo`
    /// when present, otherwise the subject DN of the signing
    /// certificate.
    pub fn tsa_identity(&self) -> Result<String, TspError> {
        if let Some(name) = &self.tst_info.tsa_name {
            return Ok(name.clone());
        }

        let (_, cert) = x509_parser::parse_x509_certificate(&self.signer_cert_der)
            .map_err(|e| TspError::MalformedEncoding(format!("signer certificate: {e}")))?;

        Ok(cert.subject().to_string())
    }
}

fn single_attr_value(attr: &x509_cert::attr::Attribute) -> Result<&der::Any, TspError> {
    if attr.values.len() != 1 {
        return Err(TspError::MalformedEncoding(format!(
            "attribute {oid} has {n} values, expected one",
            oid = attr.oid,
            n = attr.values.len()
        )));
    }

    attr.values
        .iter()
        .next()
        .ok_or_else(|| TspError::InternalError("attribute empty after length check".to_string()))
}

/// Locate the signer's certificate by `SignerIdentifier` and split it
/// from the rest of the presented chain.
fn partition_certificates(
    sd: &SignedData,
    signer_info: &SignerInfo,
) -> Result<(Vec<u8>, Vec<Vec<u8>>), TspError> {
    let certificates = sd.certificates.as_ref().ok_or_else(|| {
        TspError::MalformedEncoding("token contains no certificates".to_string())
    })?;

    let mut signer_cert_der = None;
    let mut chain_der = Vec::new();

    for cc in certificates.0.iter() {
        let CertificateChoices::Certificate(cert) = cc else {
            continue;
        };

        let matches_signer = match &signer_info.sid {
            SignerIdentifier::IssuerAndSerialNumber(isn) => {
                isn.issuer == cert.tbs_certificate.issuer
                    && isn.serial_number == cert.tbs_certificate.serial_number
            }
            SignerIdentifier::SubjectKeyIdentifier(ski) => {
                let ski_der = ski.to_der()?;
                cert.tbs_certificate
                    .extensions
                    .as_ref()
                    .map(|exts| {
                        exts.iter().any(|ext| {
                            ext.extn_id == ObjectIdentifier::new_unwrap("2.5.29.14")
                                && ext.extn_value.as_bytes() == ski_der.as_slice()
                        })
                    })
                    .unwrap_or(false)
            }
        };

        if matches_signer && signer_cert_der.is_none() {
            signer_cert_der = Some(cert.to_der()?);
        } else {
            chain_der.push(cert.to_der()?);
        }
    }

    let signer_cert_der = signer_cert_der.ok_or_else(|| {
        TspError::MalformedEncoding("no certificate matches the SignerIdentifier".to_string())
    })?;

    Ok((signer_cert_der, chain_der))
}

pub(crate) fn decode_tst_info(tst_info_der: &[u8]) -> Result<TstInfo, TspError> {
    let wire = rfc3161::TstInfo::from_der(tst_info_der)?;

    if wire.version != 1 {
        return Err(TspError::MalformedEncoding(format!(
            "unsupported TSTInfo version {v}",
            v = wire.version
        )));
    }

    let serial_bytes = minimal_unsigned(wire.serial_number.as_bytes());
    if serial_bytes.len() > 8 {
        return Err(TspError::MalformedEncoding(format!(
            "serial number is {n} bytes, exceeding 64 bits",
            n = serial_bytes.len()
        )));
    }
    let serial = serial_bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    // Serial numbers are positive integers; zero means the TSA never
    // assigned one.
    if serial == 0 {
        return Err(TspError::MalformedEncoding(
            "serial number is zero".to_string(),
        ));
    }

    let unix = wire.gen_time.to_unix_duration();
    let gen_time = DateTime::<Utc>::from_timestamp(unix.as_secs() as i64, unix.subsec_nanos())
        .ok_or_else(|| TspError::MalformedEncoding("genTime out of range".to_string()))?;

    let tsa_name = match &wire.tsa {
        Some(any) => general_name_to_string(any),
        None => None,
    };

    Ok(TstInfo {
        policy: wire.policy,
        message_imprint: MessageImprint {
            hash_algorithm: wire.message_imprint.hash_algorithm.oid,
            hashed_message: wire.message_imprint.hashed_message.as_bytes().to_vec(),
        },
        serial,
        gen_time,
        accuracy: wire.accuracy.map(Accuracy::from),
        ordering: wire.ordering,
        nonce: wire
            .nonce
            .map(|n| minimal_unsigned(n.as_bytes()).to_vec()),
        tsa_name,
    })
}

fn general_name_to_string(any: &der::Any) -> Option<String> {
    let name: GeneralName = GeneralName::from_der(&any.to_der().ok()?).ok()?;

    match name {
        GeneralName::DirectoryName(dn) => Some(dn.to_string()),
        GeneralName::Rfc822Name(s) => Some(s.to_string()),
        GeneralName::DnsName(s) => Some(s.to_string()),
        GeneralName::UniformResourceIdentifier(s) => Some(s.to_string()),
        _ => None,
    }
}
