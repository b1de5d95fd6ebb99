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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![deny(warnings)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]

pub(crate) mod asn1;
pub(crate) mod chain;
pub mod error;
pub mod http_request;
pub(crate) mod internal;
pub mod oids;
pub mod policy;
pub mod raw_signature;
pub mod registry;
pub mod request;
pub mod response;
pub mod token;
pub mod validator;

pub use error::{RejectionReason, TspError};
pub use oids::DigestAlgorithm;
pub use policy::{TenantTsaPolicy, TrustAnchor};
pub use registry::{InMemorySerialRegistry, SerialDisposition, SerialRegistry};
pub use request::{build_request, generate_nonce, MessageImprint, TimeStampRequest};
pub use response::TimeStampResponse;
pub use token::TimeStampToken;
pub use validator::{TimestampRecord, TokenValidator, TsaVerificationResult, ValidationOptions};

#[cfg(test)]
pub(crate) mod tests;
