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

use std::{sync::Arc, thread};

use chrono::Duration;

use crate::registry::{InMemorySerialRegistry, SerialDisposition, SerialRegistry};

const TSA: &str = "CN=Some TSA";

#[test]
fn first_serial_is_fresh() {
    let registry = InMemorySerialRegistry::default();

    assert_eq!(
        registry.check_and_insert(TSA, 42, &[1u8; 32]),
        SerialDisposition::Fresh
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn different_token_with_same_serial_is_a_duplicate() {
    let registry = InMemorySerialRegistry::default();

    registry.check_and_insert(TSA, 42, &[1u8; 32]);

    assert_eq!(
        registry.check_and_insert(TSA, 42, &[2u8; 32]),
        SerialDisposition::Duplicate
    );
}

#[test]
fn identical_token_within_window_is_fresh() {
    let registry = InMemorySerialRegistry::default();

    registry.check_and_insert(TSA, 42, &[1u8; 32]);

    // A byte-identical retry is not a replay.
    assert_eq!(
        registry.check_and_insert(TSA, 42, &[1u8; 32]),
        SerialDisposition::Fresh
    );
}

#[test]
fn identical_token_outside_window_is_a_duplicate() {
    let registry = InMemorySerialRegistry::new(Duration::days(30), Duration::milliseconds(1));

    registry.check_and_insert(TSA, 42, &[1u8; 32]);
    thread::sleep(std::time::Duration::from_millis(10));

    assert_eq!(
        registry.check_and_insert(TSA, 42, &[1u8; 32]),
        SerialDisposition::Duplicate
    );
}

#[test]
fn serials_are_scoped_per_tsa() {
    let registry = InMemorySerialRegistry::default();

    assert_eq!(
        registry.check_and_insert("CN=TSA One", 42, &[1u8; 32]),
        SerialDisposition::Fresh
    );
    assert_eq!(
        registry.check_and_insert("CN=TSA Two", 42, &[2u8; 32]),
        SerialDisposition::Fresh
    );
}

#[test]
fn expired_entries_are_pruned() {
    let registry = InMemorySerialRegistry::new(Duration::milliseconds(1), Duration::zero());

    registry.check_and_insert(TSA, 42, &[1u8; 32]);
    thread::sleep(std::time::Duration::from_millis(10));

    registry.prune();
    assert!(registry.is_empty());

    // A serial beyond the retention horizon counts as fresh again.
    assert_eq!(
        registry.check_and_insert(TSA, 42, &[2u8; 32]),
        SerialDisposition::Fresh
    );
}

#[test]
fn concurrent_inserts_admit_exactly_one() {
    let registry = Arc::new(InMemorySerialRegistry::default());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.check_and_insert(TSA, 7, &[i; 32]))
        })
        .collect();

    let fresh = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|d| *d == SerialDisposition::Fresh)
        .count();

    // Every thread presented a different token, so only the winner of
    // the race may be admitted.
    assert_eq!(fresh, 1);
    assert_eq!(registry.len(), 1);
}
