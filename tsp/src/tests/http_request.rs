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

use std::{
    io::{Read, Write},
    net::TcpListener,
    thread,
};

use crate::{
    error::TspError,
    http_request::{exchange_http, response_buffer_capacity},
    oids::DigestAlgorithm,
    request::{MessageImprint, TimeStampRequest},
};

const NONCE_HEX: &str = "4af03c2a9d6e815b7c4490d2e6f1a358";

/// Serve exactly one HTTP exchange, replying with `body` but declaring
/// `content_length` in the header.
fn serve_once(body: &'static [u8], content_length: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        // Drain the request before replying: headers, then as many
        // body bytes as its Content-Length promises.
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let mut header_end = None;
        let mut body_len = 0usize;
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if header_end.is_none() {
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    header_end = Some(pos + 4);
                    let headers = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
                    body_len = headers
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse().ok())
                        .unwrap_or(0);
                }
            }

            if let Some(end) = header_end {
                if buf.len() >= end + body_len {
                    break;
                }
            }
        }

        let header = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/timestamp-reply\r\n\
             Content-Length: {content_length}\r\n\
             Connection: close\r\n\r\n"
        );
        stream.write_all(header.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
    });

    format!("http://{addr}")
}

fn hello_request() -> TimeStampRequest {
    TimeStampRequest {
        message_imprint: MessageImprint::for_message(DigestAlgorithm::Sha256, b"hello"),
        req_policy: None,
        nonce: Some(hex::decode(NONCE_HEX).unwrap()),
        cert_req: true,
    }
}

#[test]
fn exchange_decodes_a_granted_response() {
    let body: &[u8] = include_bytes!("fixtures/resp_granted.der");
    let url = serve_once(body, body.len().to_string());

    let response = exchange_http(&url, &hello_request()).unwrap();

    assert!(response.is_success());
    assert_eq!(response.token().unwrap().unwrap().tst_info.serial, 1);
}

#[test]
fn response_buffer_capacity_is_capped() {
    assert_eq!(response_buffer_capacity(Some("9043")), 9043);
    assert_eq!(response_buffer_capacity(Some("9007199254740993")), 1_000_000);
    assert_eq!(response_buffer_capacity(Some("not a number")), 20000);
    assert_eq!(response_buffer_capacity(None), 20000);
}

#[test]
fn inflated_content_length_does_not_inflate_the_allocation() {
    // A TSA declaring a multi-petabyte body must not drive a matching
    // up-front allocation; the exchange has to survive it. Whether the
    // short body then reads cleanly or trips a transport error is up
    // to the HTTP client.
    let url = serve_once(
        include_bytes!("fixtures/resp_granted.der"),
        "9007199254740993".to_string(),
    );

    let result = exchange_http(&url, &hello_request());

    assert!(matches!(result, Ok(_) | Err(TspError::Transport(_))));
}
