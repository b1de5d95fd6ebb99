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

//! Raw (unwrapped) signature verification.
//!
//! These validators check a bare signature against data and a
//! DER-encoded `SubjectPublicKeyInfo`. They are used twice in this
//! crate: for the CMS signature over the token's signed attributes, and
//! for each link signature while walking a certificate chain.

use der::asn1::ObjectIdentifier;
use thiserror::Error;

use crate::oids::*;

mod ecdsa_validator;
pub(crate) use ecdsa_validator::EcdsaValidator;

mod ed25519_validator;
pub(crate) use ed25519_validator::Ed25519Validator;

mod rsa_legacy_validator;
pub(crate) use rsa_legacy_validator::RsaLegacyValidator;

mod rsa_validator;
pub(crate) use rsa_validator::RsaValidator;

/// A `RawSignatureValidator` implementation checks a signature encoded
/// using a specific signature algorithm and a private/public key pair.
///
/// IMPORTANT: This signature is typically embedded in a wrapper
/// provided by another signature mechanism. In this crate, that wrapper
/// is CMS (or an X.509 certificate), but `RawSignatureValidator` does
/// not implement either.
pub trait RawSignatureValidator {
    /// Return `Ok(())` if the signature `sig` is valid for the raw content
    /// `data` and the public key `public_key`.
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError>;
}

/// Describes errors that can be identified when validating a raw
/// signature.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignatureValidationError {
    /// The signature does not match the provided data or public key.
    #[error("the signature does not match the provided data or public key")]
    SignatureMismatch,

    /// An error was reported by the underlying cryptography implementation.
    #[error("an error was reported by the cryptography library: {0}")]
    CryptoLibraryError(String),

    /// An invalid public key was provided.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// An invalid signature value was provided.
    #[error("invalid signature value")]
    InvalidSignature,

    /// The signature uses an unsupported signing or hash algorithm.
    #[error("signature uses an unsupported algorithm")]
    UnsupportedAlgorithm,
}

/// Select a validator based on the signature algorithm OID and, for
/// plain `rsaEncryption`, the accompanying digest algorithm OID.
pub(crate) fn validator_for_sig_and_hash_algs(
    sig_alg: &ObjectIdentifier,
    hash_alg: &ObjectIdentifier,
) -> Option<Box<dyn RawSignatureValidator>> {
    // Legacy RSA: the digest algorithm travels separately.
    if *sig_alg == RSA_OID {
        if *hash_alg == SHA256_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa256));
        } else if *hash_alg == SHA384_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa384));
        } else if *hash_alg == SHA512_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa512));
        }
    }

    // Combined RSA signature OIDs.
    if *sig_alg == SHA256_WITH_RSA_OID {
        return Some(Box::new(RsaLegacyValidator::Rsa256));
    } else if *sig_alg == SHA384_WITH_RSA_OID {
        return Some(Box::new(RsaLegacyValidator::Rsa384));
    } else if *sig_alg == SHA512_WITH_RSA_OID {
        return Some(Box::new(RsaLegacyValidator::Rsa512));
    }

    // RSA-PSS: assume the digest named alongside.
    if *sig_alg == RSA_PSS_OID {
        if *hash_alg == SHA256_OID {
            return Some(Box::new(RsaValidator::Ps256));
        } else if *hash_alg == SHA384_OID {
            return Some(Box::new(RsaValidator::Ps384));
        } else if *hash_alg == SHA512_OID {
            return Some(Box::new(RsaValidator::Ps512));
        }
    }

    // Elliptic curve and hash combinations.
    if *sig_alg == ECDSA_WITH_SHA256_OID {
        return Some(Box::new(EcdsaValidator::Es256));
    } else if *sig_alg == ECDSA_WITH_SHA384_OID {
        return Some(Box::new(EcdsaValidator::Es384));
    } else if *sig_alg == ECDSA_WITH_SHA512_OID {
        return Some(Box::new(EcdsaValidator::Es512));
    }

    // Ed25519.
    if *sig_alg == ED25519_OID {
        return Some(Box::new(Ed25519Validator {}));
    }

    None
}
