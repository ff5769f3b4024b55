//! "Period processed" notifications.
//!
//! Sinks are fire-and-forget: a sink can never fail a run.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::models::PayrollPeriod;

/// Receives a signal each time a period reaches `calculated`.
pub trait PeriodEventSink: Send + Sync {
    /// Called once per successful run with the updated period.
    fn period_processed(&self, period: &PayrollPeriod);
}

/// Logs processed periods.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl PeriodEventSink for TracingEventSink {
    fn period_processed(&self, period: &PayrollPeriod) {
        let totals = period.totals.unwrap_or_default();
        info!(
            period_id = %period.id,
            company_id = %period.company_id,
            status = %period.status,
            employee_count = totals.employee_count,
            total_net = %totals.total_net,
            "Payroll period processed"
        );
    }
}

/// Forwards processed periods to an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<PayrollPeriod>,
}

impl ChannelEventSink {
    /// Creates a sink and the receiver its events arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PayrollPeriod>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl PeriodEventSink for ChannelEventSink {
    fn period_processed(&self, period: &PayrollPeriod) {
        if self.sender.send(period.clone()).is_err() {
            warn!(period_id = %period.id, "Period event receiver closed, event dropped");
        }
    }
}
