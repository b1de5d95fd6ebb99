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

//! DER wire structures for RFC 3161, RFC 4055 and RFC 5035.
//!
//! These are thin `der`-derive types; the domain model the rest of the
//! crate works with lives in [`crate::request`] and [`crate::token`].

pub(crate) mod rfc3161;
pub(crate) mod rfc4055;
pub(crate) mod rfc5035;
