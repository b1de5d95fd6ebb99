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

//! Replay detection for time-stamp token serial numbers.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Duration, Utc};

use crate::internal::time::utc_now;

/// Outcome of recording a (TSA, serial) pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerialDisposition {
    /// The pair had not been seen inside the retention horizon.
    Fresh,

    /// The pair was already recorded with a different token.
    Duplicate,
}

/// A `SerialRegistry` records which serial numbers have been accepted
/// from each TSA, so a replayed token can be rejected.
///
/// Implementations must make [`check_and_insert`] atomic: when two
/// threads present the same fresh serial concurrently, exactly one may
/// see [`SerialDisposition::Fresh`].
///
/// [`check_and_insert`]: Self::check_and_insert
pub trait SerialRegistry: Send + Sync {
    /// Atomically record `(tsa_id, serial)` and report whether it was
    /// fresh.
    ///
    /// `token_digest` identifies the exact token bytes, so that a
    /// byte-identical re-presentation can be distinguished from a true
    /// replay.
    fn check_and_insert(
        &self,
        tsa_id: &str,
        serial: u64,
        token_digest: &[u8; 32],
    ) -> SerialDisposition;

    /// Drop entries older than the retention horizon.
    fn prune(&self);
}

struct SerialEntry {
    token_digest: [u8; 32],
    first_seen: DateTime<Utc>,
}

/// A process-local [`SerialRegistry`].
///
/// Entries are pruned lazily on insert and explicitly via
/// [`SerialRegistry::prune`]. Hosts that need replay detection across
/// processes or restarts should implement the trait over shared
/// storage instead.
pub struct InMemorySerialRegistry {
    retention: Duration,
    idempotency_window: Duration,
    entries: Mutex<HashMap<(String, u64), SerialEntry>>,
}

impl Default for InMemorySerialRegistry {
    fn default() -> Self {
        Self::new(Duration::days(30), Duration::minutes(10))
    }
}

impl InMemorySerialRegistry {
    /// Create a registry.
    ///
    /// `retention` is how long a serial stays recorded;
    /// `idempotency_window` is how long a byte-identical token may be
    /// re-presented without counting as a replay.
    pub fn new(retention: Duration, idempotency_window: Duration) -> Self {
        Self {
            retention,
            idempotency_window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// True when no entries are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<(String, u64), SerialEntry>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still a valid replay record.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SerialRegistry for InMemorySerialRegistry {
    fn check_and_insert(
        &self,
        tsa_id: &str,
        serial: u64,
        token_digest: &[u8; 32],
    ) -> SerialDisposition {
        let now = utc_now();
        let mut entries = self.lock_entries();

        entries.retain(|_, entry| now - entry.first_seen <= self.retention);

        match entries.get(&(tsa_id.to_string(), serial)) {
            Some(entry)
                if entry.token_digest == *token_digest
                    && now - entry.first_seen <= self.idempotency_window =>
            {
                // Byte-identical re-presentation, e.g. a client retry.
                SerialDisposition::Fresh
            }
            Some(_) => SerialDisposition::Duplicate,
            None => {
                entries.insert(
                    (tsa_id.to_string(), serial),
                    SerialEntry {
                        token_digest: *token_digest,
                        first_seen: now,
                    },
                );
                SerialDisposition::Fresh
            }
        }
    }

    fn prune(&self) {
        let now = utc_now();
        self.lock_entries()
            .retain(|_, entry| now - entry.first_seen <= self.retention);
    }
}
