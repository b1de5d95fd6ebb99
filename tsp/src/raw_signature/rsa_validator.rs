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

use rsa::{pkcs8::DecodePublicKey, pss::Pss, RsaPublicKey};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::raw_signature::{RawSignatureValidationError, RawSignatureValidator};

/// An `RsaValidator` can validate raw signatures with the RSA-PSS
/// signature scheme.
pub enum RsaValidator {
    /// RSASSA-PSS with SHA-256
    Ps256,

    /// RSASSA-PSS with SHA-384
    Ps384,

    /// RSASSA-PSS with SHA-512
    Ps512,
}

impl RawSignatureValidator for RsaValidator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        let public_key = RsaPublicKey::from_public_key_der(public_key)
            .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

        let result = match self {
            Self::Ps256 => public_key.verify(Pss::new::<Sha256>(), &Sha256::digest(data), sig),
            Self::Ps384 => public_key.verify(Pss::new::<Sha384>(), &Sha384::digest(data), sig),
            Self::Ps512 => public_key.verify(Pss::new::<Sha512>(), &Sha512::digest(data), sig),
        };

        result.map_err(|_| RawSignatureValidationError::SignatureMismatch)
    }
}
