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

//! Decoding [RFC 3161] `TimeStampResp` messages.
//!
//! [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161

use der::{Decode, Encode};

use crate::{
    asn1::rfc3161,
    error::TspError,
    token::{ResponseStatus, TimeStampToken},
};

/// A decoded `TimeStampResp`.
pub struct TimeStampResponse(rfc3161::TimeStampResp);

impl TimeStampResponse {
    /// Decode a response from DER.
    pub fn from_der(response_der: &[u8]) -> Result<Self, TspError> {
        Ok(Self(rfc3161::TimeStampResp::from_der(response_der)?))
    }

    /// Status reported by the TSA.
    pub fn status(&self) -> ResponseStatus {
        let detail = match &self.0.status.status_string {
            Some(texts) => texts.join("; "),
            None => String::new(),
        };

        ResponseStatus {
            status: self.0.status.status,
            detail,
        }
    }

    /// True for `granted` and `grantedWithMods`.
    pub fn is_success(&self) -> bool {
        self.status().is_granted()
    }

    /// The raw token `ContentInfo` bytes, if a token is present.
    pub fn token_bytes(&self) -> Result<Option<Vec<u8>>, TspError> {
        match &self.0.time_stamp_token {
            Some(token) => Ok(Some(token.to_der()?)),
            None => Ok(None),
        }
    }

    /// Decode the embedded token, carrying this response's status along.
    ///
    /// Returns `Ok(None)` when the response has no token, which is the
    /// normal shape of a rejection.
    pub fn token(&self) -> Result<Option<TimeStampToken>, TspError> {
        match self.token_bytes()? {
            Some(bytes) => Ok(Some(TimeStampToken::from_content_info_der(
                &bytes,
                self.status(),
            )?)),
            None => Ok(None),
        }
    }
}
