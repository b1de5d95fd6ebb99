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

use ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::VerifyingKey as P256VerifyingKey;
use p384::ecdsa::VerifyingKey as P384VerifyingKey;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::raw_signature::{RawSignatureValidationError, RawSignatureValidator};

/// An `EcdsaValidator` can validate raw signatures with one of the ECDSA
/// signature algorithms.
///
/// The curve is taken from the public key; P-256 and P-384 are
/// supported.
pub enum EcdsaValidator {
    /// ECDSA with SHA-256
    Es256,

    /// ECDSA with SHA-384
    Es384,

    /// ECDSA with SHA-512
    Es512,
}

impl RawSignatureValidator for EcdsaValidator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        let digest = match self {
            EcdsaValidator::Es256 => Sha256::digest(data).to_vec(),
            EcdsaValidator::Es384 => Sha384::digest(data).to_vec(),
            EcdsaValidator::Es512 => Sha512::digest(data).to_vec(),
        };

        // CMS and X.509 carry ECDSA signatures in ASN.1 DER form; accept
        // fixed-width P1363 as a fallback.
        {
            use p256::pkcs8::DecodePublicKey;
            if let Ok(vk) = P256VerifyingKey::from_public_key_der(public_key) {
                let signature = ecdsa::Signature::<p256::NistP256>::from_der(sig)
                    .or_else(|_| ecdsa::Signature::<p256::NistP256>::from_slice(sig))
                    .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

                return vk
                    .verify_prehash(&digest, &signature)
                    .map_err(|_| RawSignatureValidationError::SignatureMismatch);
            }
        }

        {
            use p384::pkcs8::DecodePublicKey;
            if let Ok(vk) = P384VerifyingKey::from_public_key_der(public_key) {
                let signature = ecdsa::Signature::<p384::NistP384>::from_der(sig)
                    .or_else(|_| ecdsa::Signature::<p384::NistP384>::from_slice(sig))
                    .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

                return vk
                    .verify_prehash(&digest, &signature)
                    .map_err(|_| RawSignatureValidationError::SignatureMismatch);
            }
        }

        Err(RawSignatureValidationError::InvalidPublicKey)
    }
}
