//! Audit records for created activities.

use crate::models::Activity;

/// Receives one record per successfully created activity.
pub trait AuditSink: Send + Sync {
    fn activity_created(&self, activity: &Activity);
}

/// Emits audit records as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn activity_created(&self, activity: &Activity) {
        tracing::info!(
            target: "audit",
            activity_id = activity.id.as_deref().unwrap_or_default(),
            user_id = %activity.user_id,
            activity_type = %activity.activity_type,
            carbon_emission = activity.carbon_emission,
            "Activity created"
        );
    }
}
