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

//! HTTP transport for the time-stamp protocol (RFC 3161 §3.4).

use crate::{
    error::TspError,
    internal::minimal_unsigned,
    request::{encode_request, request_headers, TimeStampRequest},
    response::TimeStampResponse,
};

const HTTP_CONTENT_TYPE_REQUEST: &str = "application/timestamp-query";
const HTTP_CONTENT_TYPE_RESPONSE: &str = "application/timestamp-reply";

/// Responses larger than this are cut off rather than read to the end.
const MAX_RESPONSE_BYTES: u64 = 1_000_000;

/// Send `request` to the TSA at `url` and decode its response.
///
/// This performs only transport-level sanity checks plus the nonce
/// reflection check; callers must still run the decoded token through
/// [`TokenValidator`](crate::TokenValidator) before trusting it.
pub fn exchange_http(url: &str, request: &TimeStampRequest) -> Result<TimeStampResponse, TspError> {
    let body = encode_request(request)?;

    let response_bytes = post_request(url, &body)?;

    let response = TimeStampResponse::from_der(&response_bytes)?;

    // Verify the nonce was reflected, if one was sent. Catching this
    // here lets a caller retry a misbehaving TSA before the full
    // validation pass.
    if response.is_success() {
        if let Some(nonce) = &request.nonce {
            let echoed = response
                .token()?
                .and_then(|token| token.tst_info.nonce.clone());

            if echoed.as_deref() != Some(minimal_unsigned(nonce)) {
                return Err(TspError::Transport(
                    "TSA did not echo the request nonce".to_string(),
                ));
            }
        }
    }

    Ok(response)
}

fn post_request(url: &str, body: &[u8]) -> Result<Vec<u8>, TspError> {
    use std::io::Read;

    let mut req = ureq::post(url);

    for (ref name, ref value) in request_headers() {
        req = req.set(name.as_str(), value.as_str());
    }

    let response = req
        .set("Content-Type", HTTP_CONTENT_TYPE_REQUEST)
        .send_bytes(body)
        .map_err(|e| TspError::Transport(e.to_string()))?;

    if response.status() != 200 || response.content_type() != HTTP_CONTENT_TYPE_RESPONSE {
        return Err(TspError::Transport(format!(
            "unexpected response: status {status}, content type {content_type}",
            status = response.status(),
            content_type = response.content_type()
        )));
    }

    let len = response_buffer_capacity(response.header("Content-Length"));

    let mut response_bytes: Vec<u8> = Vec::with_capacity(len);

    response
        .into_reader()
        .take(MAX_RESPONSE_BYTES)
        .read_to_end(&mut response_bytes)
        .map_err(|e| TspError::Transport(e.to_string()))?;

    Ok(response_bytes)
}

/// Size the response buffer from the peer's `Content-Length`, never
/// beyond the read cap. The header is attacker-controlled.
pub(crate) fn response_buffer_capacity(content_length: Option<&str>) -> usize {
    content_length
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(20000)
        .min(MAX_RESPONSE_BYTES as usize)
}
