//! Notification types
//!
//! Types for scheduled tenant notifications held by the in-memory
//! notification center.

use std::{fmt, io, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PaymentDue,
    PaymentOverdue,
    LeaseExpiring,
    DocumentExpiring,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotificationKind::PaymentDue => write!(f, "payment_due"),
            NotificationKind::PaymentOverdue => write!(f, "payment_overdue"),
            NotificationKind::LeaseExpiring => write!(f, "lease_expiring"),
            NotificationKind::DocumentExpiring => {
                write!(f, "document_expiring")
            },
        }
    }
}

impl FromStr for NotificationKind {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<NotificationKind, Self::Err> {
        match value {
            "payment_due" => Ok(NotificationKind::PaymentDue),
            "payment_overdue" => Ok(NotificationKind::PaymentOverdue),
            "lease_expiring" => Ok(NotificationKind::LeaseExpiring),
            "document_expiring" => Ok(NotificationKind::DocumentExpiring),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Notification kind not supported",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

/// A single scheduled notification.
///
/// Lives only in process memory; a restart drops all pending entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub recipient: String,
    pub scheduled_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub status: NotificationStatus,
}

impl Notification {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == NotificationStatus::Pending && self.scheduled_at <= now
    }
}
