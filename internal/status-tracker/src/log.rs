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

use std::{borrow::Cow, fmt::Debug};

use crate::StatusTracker;

/// Detailed information about an error or other noteworthy condition
/// observed while validating a time-stamp token.
///
/// Use the [`log_item`](crate::log_item) macro to create a `LogItem`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogItem {
    /// Kind of log item.
    pub kind: LogKind,

    /// Label of the item this `LogItem` describes (a check name, a TSA
    /// identity, or other descriptive label).
    pub label: Cow<'static, str>,

    /// Description of the condition.
    pub description: Cow<'static, str>,

    /// Crate where the condition was detected.
    pub crate_name: Cow<'static, str>,

    /// Version of the crate where the condition was detected.
    pub crate_version: Cow<'static, str>,

    /// Source file where the condition was detected.
    pub file: Cow<'static, str>,

    /// Function where the condition was detected.
    pub function: Cow<'static, str>,

    /// Source line number where the condition was detected.
    pub line: u32,

    /// Error value as string, if any.
    pub err_val: Option<Cow<'static, str>>,

    /// Machine-readable validation status code, if any.
    pub validation_status: Option<Cow<'static, str>>,
}

impl LogItem {
    /// Add a validation status code.
    ///
    /// ## Example
    ///
    /// ```
    /// # use tsp_status_tracker::{log_item, validation_codes, LogItem};
    /// let log =
    ///     log_item!("serial 42", "serial reused", "check_serial").validation_status("timeStamp.replayed");
    ///
    /// assert_eq!(
    ///     log.validation_status.as_deref(),
    ///     Some(validation_codes::TIMESTAMP_REPLAYED)
    /// );
    /// ```
    pub fn validation_status(self, status: &'static str) -> Self {
        LogItem {
            validation_status: Some(status.into()),
            ..self
        }
    }

    /// Mark this `LogItem` as a success and add it to the
    /// [`StatusTracker`].
    pub fn success(self, tracker: &mut StatusTracker) {
        tracker.add_non_error(LogItem {
            kind: LogKind::Success,
            ..self
        });
    }

    /// Mark this `LogItem` as informational and add it to the
    /// [`StatusTracker`].
    pub fn informational(self, tracker: &mut StatusTracker) {
        tracker.add_non_error(LogItem {
            kind: LogKind::Informational,
            ..self
        });
    }

    /// Mark this `LogItem` as a failure and add it to the
    /// [`StatusTracker`].
    ///
    /// The description of `err` is captured in `err_val`. If the tracker
    /// is configured to abort on the first error, this returns
    /// `Err(err)`; otherwise it returns `Ok(())` and validation may
    /// continue.
    pub fn failure<E: Debug>(self, tracker: &mut StatusTracker, err: E) -> Result<(), E> {
        let item = LogItem {
            kind: LogKind::Failure,
            err_val: Some(format!("{err:?}").into()),
            ..self
        };
        tracker.add_error(item, err)
    }

    /// Mark this `LogItem` as a failure and add it to the
    /// [`StatusTracker`], discarding the tracker's error policy.
    ///
    /// Use this when the caller will raise its own error regardless.
    pub fn failure_no_throw<E: Debug>(self, tracker: &mut StatusTracker, err: E) {
        tracker.add_non_error(LogItem {
            kind: LogKind::Failure,
            err_val: Some(format!("{err:?}").into()),
            ..self
        });
    }
}

/// Kind of log entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogKind {
    /// This log entry describes a successful check.
    Success,

    /// This log entry describes an informational condition.
    Informational,

    /// This log entry describes a failed check.
    Failure,
}

/// Creates a [`LogItem`] annotated with the source crate, file, and line
/// number where the log condition was discovered.
///
/// Takes three parameters, each of which may be a `'static str` or `String`:
///
/// * `label`: name of the object this `LogItem` references
/// * `description`: human-readable reason for this `LogItem`
/// * `function`: name of the function generating this `LogItem`
///
/// ## Example
///
/// ```
/// # use std::borrow::Cow;
/// # use tsp_status_tracker::{log_item, LogItem, LogKind};
/// let log = log_item!("TimeStampToken", "imprint verified", "check_imprint");
///
/// assert_eq!(
///     log,
///     LogItem {
///         kind: LogKind::Informational,
///         label: Cow::Borrowed("TimeStampToken"),
///         description: Cow::Borrowed("imprint verified"),
///         crate_name: log.crate_name.clone(),
///         crate_version: log.crate_version.clone(),
///         file: Cow::Borrowed(file!()),
///         function: Cow::Borrowed("check_imprint"),
///         line: log.line,
///         err_val: None,
///         validation_status: None,
///     }
/// );
/// ```
#[macro_export]
macro_rules! log_item {
    ($label:expr, $description:expr, $function:expr) => {{
        $crate::LogItem {
            kind: $crate::LogKind::Informational,
            label: $label.into(),
            description: $description.into(),
            crate_name: env!("CARGO_PKG_NAME").into(),
            crate_version: env!("CARGO_PKG_VERSION").into(),
            file: file!().into(),
            function: $function.into(),
            line: line!(),
            err_val: None,
            validation_status: None,
        }
    }};
}
