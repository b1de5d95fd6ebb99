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

//! The `SigningCertificateV2` signed attribute from [RFC 5035].
//!
//! [RFC 5035]: https://datatracker.ietf.org/doc/html/rfc5035

use der::{asn1::OctetString, Any, Sequence};
use x509_cert::{
    ext::pkix::name::GeneralNames, serial_number::SerialNumber, spki::AlgorithmIdentifierOwned,
};

use crate::oids::SHA256_OID;

/// RFC 5035 `SigningCertificateV2`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SigningCertificateV2 {
    /// First entry must describe the signing certificate itself.
    pub certs: Vec<EssCertIdV2>,

    /// Certificate policies; not consumed by this crate.
    #[asn1(optional = "true")]
    pub policies: Option<Any>,
}

/// RFC 5035 `ESSCertIDv2`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EssCertIdV2 {
    /// Hash algorithm for `cert_hash`; SHA-256 when absent.
    pub hash_algorithm: AlgorithmIdentifierOwned,

    /// Hash over the entire DER-encoded certificate.
    pub cert_hash: OctetString,

    pub issuer_serial: Option<IssuerSerial>,
}

// Manual `Sequence` impl: the `#[asn1(default = ...)]` derive attribute
// requires a `Copy` field type, which `AlgorithmIdentifierOwned` is not.
impl<'a> der::DecodeValue<'a> for EssCertIdV2 {
    fn decode_value<R: der::Reader<'a>>(reader: &mut R, header: der::Header) -> der::Result<Self> {
        use der::{Decode, Reader};

        reader.read_nested(header.length, |reader| {
            let hash_algorithm = Option::<AlgorithmIdentifierOwned>::decode(reader)?
                .unwrap_or_else(sha256_algorithm_identifier);
            let cert_hash = reader.decode()?;
            let issuer_serial = reader.decode()?;

            Ok(Self {
                hash_algorithm,
                cert_hash,
                issuer_serial,
            })
        })
    }
}

impl der::EncodeValue for EssCertIdV2 {
    fn value_len(&self) -> der::Result<der::Length> {
        use der::Encode;

        self.hash_algorithm_for_encoding().encoded_len()?
            + self.cert_hash.encoded_len()?
            + self.issuer_serial.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl der::Writer) -> der::Result<()> {
        use der::Encode;

        self.hash_algorithm_for_encoding().encode(writer)?;
        self.cert_hash.encode(writer)?;
        self.issuer_serial.encode(writer)?;
        Ok(())
    }
}

impl<'a> der::Sequence<'a> for EssCertIdV2 {}

impl EssCertIdV2 {
    /// Omit `hash_algorithm` from the encoding when it equals the DEFAULT.
    fn hash_algorithm_for_encoding(&self) -> Option<AlgorithmIdentifierOwned> {
        if self.hash_algorithm == sha256_algorithm_identifier() {
            None
        } else {
            Some(self.hash_algorithm.clone())
        }
    }
}

/// RFC 5035 `IssuerSerial`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct IssuerSerial {
    pub issuer: GeneralNames,
    pub serial_number: SerialNumber,
}

/// The `DEFAULT` value for [`EssCertIdV2::hash_algorithm`].
pub fn sha256_algorithm_identifier() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: SHA256_OID,
        parameters: None,
    }
}
