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

use crate::response::TimeStampResponse;

#[test]
fn decodes_granted_response() {
    let response =
        TimeStampResponse::from_der(include_bytes!("fixtures/resp_granted.der")).unwrap();

    assert!(response.is_success());
    assert_eq!(response.status().status, 0);
    assert!(response.status().detail.is_empty());
}

#[test]
fn granted_response_carries_a_token() {
    let response =
        TimeStampResponse::from_der(include_bytes!("fixtures/resp_granted.der")).unwrap();

    let token = response.token().unwrap().unwrap();

    assert!(token.status.is_granted());
    assert_eq!(token.tst_info.serial, 1);
}

#[test]
fn token_bytes_round_trip() {
    let response =
        TimeStampResponse::from_der(include_bytes!("fixtures/resp_granted.der")).unwrap();

    let bytes = response.token_bytes().unwrap().unwrap();

    // The extracted ContentInfo must itself decode as a token.
    let token = crate::token::TimeStampToken::from_der(&bytes).unwrap();
    assert_eq!(token.tst_info.serial, 1);
}

#[test]
fn truncated_response_is_rejected() {
    let der = include_bytes!("fixtures/resp_granted.der");

    assert!(TimeStampResponse::from_der(&der[..der.len() / 2]).is_err());
}
