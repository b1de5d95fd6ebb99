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

pub(crate) mod time;

/// Strip leading zero octets from a big-endian unsigned integer.
///
/// DER INTEGER encoding may prepend a zero octet to keep a value
/// non-negative; comparisons of nonces and serials must ignore it.
pub(crate) fn minimal_unsigned(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start < bytes.len().saturating_sub(1) && bytes[start] == 0 {
        start += 1;
    }
    &bytes[start..]
}
