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

//! `RSASSA-PSS-params` from [RFC 4055 §3.1].
//!
//! [RFC 4055 §3.1]: https://datatracker.ietf.org/doc/html/rfc4055#section-3.1

use der::Sequence;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::oids::SHA1_OID;

/// RFC 4055 `RSASSA-PSS-params`, as found in the `parameters` of an
/// id-RSASSA-PSS `AlgorithmIdentifier`.
///
/// Only `hash_algorithm` is consumed; the MGF is not cross-checked
/// because a mismatched mask generation function fails signature
/// verification anyway.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RsaPssParams {
    /// Digest used for the message hash; SHA-1 when absent.
    #[asn1(context_specific = "0", default = "sha1_algorithm_identifier")]
    pub hash_algorithm: AlgorithmIdentifierOwned,

    /// Mask generation function; MGF1 with SHA-1 when absent.
    #[asn1(context_specific = "1", optional = "true")]
    pub mask_gen_algorithm: Option<AlgorithmIdentifierOwned>,

    #[asn1(context_specific = "2", default = "default_salt_length")]
    pub salt_length: u32,

    #[asn1(context_specific = "3", default = "default_trailer_field")]
    pub trailer_field: u32,
}

/// The `DEFAULT sha1` value for [`RsaPssParams::hash_algorithm`].
fn sha1_algorithm_identifier() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: SHA1_OID,
        parameters: None,
    }
}

fn default_salt_length() -> u32 {
    20
}

fn default_trailer_field() -> u32 {
    1
}
