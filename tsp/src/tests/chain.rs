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

use chrono::{Duration, Utc};

use crate::{chain::check_certificate_chain, error::RejectionReason};

#[test]
fn pss_signed_link_is_verified() {
    // Self-signed with id-RSASSA-PSS; the digest OID lives in the
    // signature algorithm parameters, not the algorithm OID itself.
    let cert = include_bytes!("fixtures/pss_root_ca.der").to_vec();
    let anchors = vec![cert.clone()];

    check_certificate_chain(&cert, &[], &anchors, Utc::now()).unwrap();
}

#[test]
fn pss_anchor_outside_validity_is_rejected() {
    let cert = include_bytes!("fixtures/pss_root_ca.der").to_vec();
    let anchors = vec![cert.clone()];

    let err = check_certificate_chain(&cert, &[], &anchors, Utc::now() - Duration::days(36500))
        .unwrap_err();

    assert!(matches!(err, RejectionReason::ChainInvalid { .. }));
}
