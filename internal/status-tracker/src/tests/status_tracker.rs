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

use crate::{log_item, validation_codes, ErrorBehavior, StatusTracker};

#[test]
fn aggregates_errors_by_default() {
    let mut tracker = StatusTracker::default();

    log_item!("test1", "test item 1", "test func").success(&mut tracker);

    // An error item should not stop aggregation.
    log_item!("test2", "test item 2", "test func")
        .failure(&mut tracker, SampleError {})
        .unwrap();

    log_item!("test3", "test item 3", "test func")
        .failure(&mut tracker, SampleError {})
        .unwrap();

    assert_eq!(tracker.logged_items().len(), 3);
    assert_eq!(tracker.filter_errors().count(), 2);
    assert!(tracker.has_any_error());
    assert!(tracker.has_error(SampleError {}));
}

#[test]
fn stops_on_first_error_when_configured() {
    let mut tracker = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);

    log_item!("test1", "test item 1", "test func").success(&mut tracker);

    let result = log_item!("test2", "test item 2", "test func")
        .failure(&mut tracker, SampleError {});

    assert!(result.is_err());
    assert_eq!(tracker.logged_items().len(), 2);
}

#[test]
fn failure_no_throw_never_raises() {
    let mut tracker = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);

    log_item!("test1", "test item 1", "test func").failure_no_throw(&mut tracker, SampleError {});

    assert_eq!(tracker.logged_items().len(), 1);
    assert!(tracker.has_any_error());
}

#[test]
fn has_status_finds_codes() {
    let mut tracker = StatusTracker::default();

    log_item!("token", "serial reused", "check_serial")
        .validation_status(validation_codes::TIMESTAMP_REPLAYED)
        .failure_no_throw(&mut tracker, SampleError {});

    assert!(tracker.has_status(validation_codes::TIMESTAMP_REPLAYED));
    assert!(!tracker.has_status(validation_codes::TIMESTAMP_VALIDATED));
}

#[test]
fn append_merges_trackers() {
    let mut a = StatusTracker::default();
    let mut b = StatusTracker::default();

    log_item!("test1", "test item 1", "test func").success(&mut a);
    log_item!("test2", "test item 2", "test func").success(&mut b);

    a.append(&b);
    assert_eq!(a.logged_items().len(), 2);
}

#[derive(Debug)]
struct SampleError {}

impl Display for SampleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "SampleError")
    }
}
