use std::fmt;

use serde_json::Value;
use tracing::error;

use crate::configuration::State;

#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    AccessReport,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Update => write!(f, "UPDATE"),
            AuditAction::Delete => write!(f, "DELETE"),
            AuditAction::AccessReport => write!(f, "ACCESS_REPORT"),
        }
    }
}

/// Write an audit trail entry. Failures are logged and swallowed so a broken
/// audit table never fails the originating request.
pub async fn log_audit(
    state: &State,
    action: AuditAction,
    actor: &str,
    details: Value,
) {
    let result = state
        .database
        .audit_log
        .insert(action.to_string(), actor.to_owned(), details)
        .await;

    if let Err(e) = result {
        error!("Failed to write audit trail: {}", e);
    }
}
