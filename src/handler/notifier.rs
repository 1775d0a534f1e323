//! Notification scheduling
//!
//! An in-memory list of pending notifications, populated by date-arithmetic
//! scans over leases, payments and documents, drained by a periodic timer.
//! Delivery is a structured log line; nothing survives a restart.

use std::{sync::Mutex, time::Duration};

use chrono::{Duration as ChronoDuration, Utc};
use tokio::time;
use tracing::{error, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
    report::fmt_date,
    types::{Notification, NotificationKind, NotificationStatus},
};

#[derive(Debug, Default)]
pub struct NotificationCenter {
    pending: Mutex<Vec<Notification>>,
    sent: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a notification unless one with the same id was already
    /// scheduled or delivered.
    pub fn schedule(&self, notification: Notification) -> bool {
        let mut pending = self.pending.lock().expect("notification lock");
        let already_known = pending
            .iter()
            .any(|existing| existing.id == notification.id)
            || self
                .sent
                .lock()
                .expect("notification lock")
                .iter()
                .any(|existing| existing.id == notification.id);

        if already_known {
            return false;
        }

        pending.push(notification);
        true
    }

    pub fn pending(&self) -> Vec<Notification> {
        self.pending.lock().expect("notification lock").clone()
    }

    /// Delivered notifications, most recent first.
    pub fn history(&self, limit: usize) -> Vec<Notification> {
        let sent = self.sent.lock().expect("notification lock");
        let mut items: Vec<Notification> = sent.clone();
        items.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        items.truncate(limit);
        items
    }

    /// Drain everything due at `now`: log each entry as "sent" and move it
    /// into the history list. Returns the delivered batch.
    pub fn process_due(
        &self,
        now: chrono::DateTime<Utc>,
    ) -> Vec<Notification> {
        let mut pending = self.pending.lock().expect("notification lock");
        let mut due: Vec<Notification> = Vec::new();

        pending.retain(|notification| {
            if notification.is_due(now) {
                due.push(notification.clone());
                false
            } else {
                true
            }
        });
        drop(pending);

        let mut sent = self.sent.lock().expect("notification lock");
        for notification in &mut due {
            info!(
                kind = %notification.kind,
                recipient = %notification.recipient,
                "{}: {}",
                notification.title,
                notification.message
            );
            notification.status = NotificationStatus::Sent;
            notification.sent_at = Some(now);
            sent.push(notification.clone());
        }

        due
    }
}

/// One scan + drain pass. Exposed so the maintenance endpoint can force it.
pub async fn run_notification_cycle(
    state: &AppState<State>,
) -> Result<usize, Error> {
    scan_lease_expirations(state).await?;
    scan_overdue_payments(state).await?;
    scan_document_expirations(state).await?;

    let delivered = state.notifications.process_due(Utc::now());
    Ok(delivered.len())
}

async fn scan_lease_expirations(
    state: &AppState<State>,
) -> Result<(), Error> {
    let now = Utc::now();
    let cutoff = now + ChronoDuration::days(state.config.lease_notice_days);

    let leases = state
        .database
        .lease
        .get_expiring_between(now, cutoff)
        .await?;

    for lease in leases {
        state.notifications.schedule(Notification {
            id: format!("lease_expiring_{}", lease.lease_id),
            kind: NotificationKind::LeaseExpiring,
            title: String::from("Lease Expiration Reminder"),
            message: format!(
                "Dear {}, your lease for unit {} at {} is expiring on {}.",
                lease.tenant_name,
                lease.unit_name,
                lease.property_name,
                fmt_date(&lease.end_date)
            ),
            recipient: lease.tenant_email,
            scheduled_at: now,
            sent_at: None,
            status: NotificationStatus::Pending,
        });
    }

    Ok(())
}

async fn scan_overdue_payments(state: &AppState<State>) -> Result<(), Error> {
    let now = Utc::now();
    let grace = ChronoDuration::days(state.config.grace_period_days);

    let payments = state
        .database
        .payment
        .get_overdue_with_contacts(now)
        .await?;

    for payment in payments {
        if payment.payment_date + grace > now {
            continue;
        }

        state.notifications.schedule(Notification {
            id: format!("payment_overdue_{}", payment.payment_id),
            kind: NotificationKind::PaymentOverdue,
            title: String::from("Overdue Payment Reminder"),
            message: format!(
                "Dear {}, your payment of {} for unit {} at {} is overdue. \
                 Please pay immediately to avoid late fees.",
                payment.tenant_name,
                crate::report::fmt_usd(&payment.amount),
                payment.unit_name,
                payment.property_name
            ),
            recipient: payment.tenant_email,
            scheduled_at: now,
            sent_at: None,
            status: NotificationStatus::Pending,
        });
    }

    Ok(())
}

async fn scan_document_expirations(
    state: &AppState<State>,
) -> Result<(), Error> {
    let now = Utc::now();
    let cutoff = now + ChronoDuration::days(state.config.document_notice_days);

    let documents = state
        .database
        .document
        .get_expiring_between(now, cutoff)
        .await?;

    for document in documents {
        state.notifications.schedule(Notification {
            id: format!("document_expiring_{}", document.document_id),
            kind: NotificationKind::DocumentExpiring,
            title: String::from("Document Expiration Reminder"),
            message: format!(
                "Dear {}, your document \"{}\" is expiring on {}.",
                document.tenant_name,
                document.name,
                fmt_date(&document.expires_at)
            ),
            recipient: document.tenant_email,
            scheduled_at: now,
            sent_at: None,
            status: NotificationStatus::Pending,
        });
    }

    Ok(())
}

/// Periodic scan + drain loop driven by a tokio interval.
pub async fn notification_task(
    app_state: AppState<State>,
) -> Result<(), Error> {
    let interval_secs = app_state.config.notification_interval_minutes * 60;
    let mut interval = time::interval(Duration::from_secs(interval_secs));
    interval.tick().await;

    loop {
        interval.tick().await;

        match run_notification_cycle(&app_state).await {
            Ok(delivered) if delivered > 0 => {
                info!("Delivered {} notification(s)", delivered);
            },
            Ok(_) => {},
            Err(e) => error!("Notification cycle failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn notification(id: &str, offset_minutes: i64) -> Notification {
        Notification {
            id: id.to_owned(),
            kind: NotificationKind::LeaseExpiring,
            title: String::from("Lease Expiration Reminder"),
            message: String::from("your lease is expiring"),
            recipient: String::from("tenant@example.com"),
            scheduled_at: Utc::now() + ChronoDuration::minutes(offset_minutes),
            sent_at: None,
            status: NotificationStatus::Pending,
        }
    }

    #[test]
    fn test_schedule_dedups_by_id() {
        let center = NotificationCenter::new();

        assert!(center.schedule(notification("lease_expiring_1", 0)));
        assert!(!center.schedule(notification("lease_expiring_1", 0)));
        assert!(center.schedule(notification("lease_expiring_2", 0)));

        assert_eq!(center.pending().len(), 2);
    }

    #[test]
    fn test_process_due_skips_future_entries() {
        let center = NotificationCenter::new();
        center.schedule(notification("due_now", -5));
        center.schedule(notification("due_later", 60));

        let delivered = center.process_due(Utc::now());

        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].id, "due_now");
        assert_eq!(delivered[0].status, NotificationStatus::Sent);
        assert!(delivered[0].sent_at.is_some());

        let pending = center.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "due_later");
    }

    #[test]
    fn test_delivered_ids_stay_deduplicated() {
        let center = NotificationCenter::new();
        center.schedule(notification("payment_overdue_9", -1));
        center.process_due(Utc::now());

        // A later scan finding the same overdue payment must not re-enqueue
        assert!(!center.schedule(notification("payment_overdue_9", -1)));
        assert!(center.pending().is_empty());
    }

    #[test]
    fn test_history_is_most_recent_first_and_limited() {
        let center = NotificationCenter::new();
        let now = Utc::now();

        center.schedule(notification("a", -30));
        center.process_due(now - ChronoDuration::minutes(20));

        center.schedule(notification("b", -30));
        center.process_due(now - ChronoDuration::minutes(10));

        center.schedule(notification("c", -30));
        center.process_due(now);

        let history = center.history(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "c");
        assert_eq!(history[1].id, "b");
    }
}
