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

use std::fmt::{self, Display, Formatter};

use crate::{log_item, validation_codes, LogKind, StatusTracker};

#[test]
fn macro_captures_source_location() {
    let log = log_item!("token", "imprint verified", "check_imprint");

    assert_eq!(log.label, "token");
    assert_eq!(log.description, "imprint verified");
    assert_eq!(log.function, "check_imprint");
    assert_eq!(log.file, file!());
    assert_eq!(log.crate_name, env!("CARGO_PKG_NAME"));
    assert!(log.line > 0);
    assert!(log.err_val.is_none());
    assert!(log.validation_status.is_none());
}

#[test]
fn validation_status_is_recorded() {
    let log = log_item!("token", "serial reused", "check_serial")
        .validation_status(validation_codes::TIMESTAMP_REPLAYED);

    assert_eq!(
        log.validation_status.as_deref(),
        Some("timeStamp.replayed")
    );
}

#[test]
fn failure_captures_error_debug_repr() {
    let mut tracker = StatusTracker::default();

    log_item!("token", "signature mismatch", "verify_signature")
        .failure(&mut tracker, SampleError {})
        .unwrap();

    let item = &tracker.logged_items()[0];
    assert_eq!(item.kind, LogKind::Failure);
    assert_eq!(item.err_val.as_deref(), Some("SampleError"));
}

#[test]
fn success_sets_kind() {
    let mut tracker = StatusTracker::default();

    log_item!("token", "imprint verified", "check_imprint").success(&mut tracker);

    assert_eq!(tracker.logged_items()[0].kind, LogKind::Success);
}

#[test]
fn log_kind_for_codes() {
    assert_eq!(
        validation_codes::log_kind(validation_codes::TIMESTAMP_VALIDATED),
        LogKind::Success
    );
    assert_eq!(
        validation_codes::log_kind(validation_codes::TIMESTAMP_REPLAYED),
        LogKind::Failure
    );
}

#[derive(Debug)]
struct SampleError {}

impl Display for SampleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "SampleError")
    }
}
