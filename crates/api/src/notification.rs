// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort notification of teachers after a rotation change.
//!
//! Delivery is fire-and-collect: each recipient is attempted once and
//! failures are returned to the caller instead of failing the operation
//! that triggered them.

use thiserror::Error;
use tracing::{debug, warn};
use turnus_persistence::TeacherData;

use crate::request_response::NotificationFailureInfo;

/// Notification delivery errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// The teacher has no address to deliver to.
    #[error("Teacher {teacher_id} has no email address")]
    MissingAddress { teacher_id: i64 },

    /// The transport rejected or failed the delivery.
    #[error("Delivery to {recipient} failed: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}

/// Sends rotation notifications to teachers.
pub trait NotificationDispatcher: Send + Sync {
    /// Notifies one teacher that the rotation of `class_name` changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn notify(
        &self,
        recipient: &TeacherData,
        class_name: &str,
        link: &str,
    ) -> Result<(), NotificationError>;
}

/// Outcome of notifying a set of teachers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Teachers notified successfully.
    pub delivered: Vec<i64>,
    /// Teachers whose notification failed.
    pub failures: Vec<NotificationFailureInfo>,
}

/// Builds the link to the rotation of a class.
#[must_use]
pub fn rotation_link(public_base_url: &str, class_id: i64) -> String {
    format!(
        "{}/classes/{class_id}/rotation",
        public_base_url.trim_end_matches('/')
    )
}

/// Notifies each recipient once and collects the failures.
#[must_use]
pub fn dispatch_to_all(
    dispatcher: &dyn NotificationDispatcher,
    recipients: &[TeacherData],
    class_name: &str,
    link: &str,
) -> DispatchReport {
    let mut report: DispatchReport = DispatchReport::default();

    for teacher in recipients {
        match dispatcher.notify(teacher, class_name, link) {
            Ok(()) => {
                debug!(teacher_id = teacher.teacher_id, class_name, "Notification sent");
                report.delivered.push(teacher.teacher_id);
            }
            Err(e) => {
                warn!(
                    teacher_id = teacher.teacher_id,
                    class_name,
                    error = %e,
                    "Notification failed"
                );
                report.failures.push(NotificationFailureInfo {
                    teacher_id: teacher.teacher_id,
                    message: e.to_string(),
                });
            }
        }
    }

    report
}
