//! Pluggable refresh scheduling.
//!
//! A [`RefreshTrigger`] decides when the next refresh cycle runs and in
//! which mode; [`Storico::run_scheduled`] drives refreshes off it until it
//! stops yielding. The orchestrator stays free of policy: callers can plug
//! in a fixed interval, a cron-like source, or a channel fed by a UI.

use std::time::Duration;

use async_trait::async_trait;

use storico_core::RefreshMode;

use crate::Storico;

/// Decides when and how the next refresh cycle runs.
#[async_trait]
pub trait RefreshTrigger: Send {
    /// Resolve when the next refresh is due, yielding its mode. `None`
    /// stops the scheduling loop.
    async fn next_mode(&mut self) -> Option<RefreshMode>;
}

/// Inert trigger: never schedules anything. The default for callers that
/// refresh explicitly via [`Storico::refresh_all`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTrigger;

#[async_trait]
impl RefreshTrigger for ManualTrigger {
    async fn next_mode(&mut self) -> Option<RefreshMode> {
        None
    }
}

/// Fixed-period trigger. The first cycle fires after one full period, not
/// immediately, so startup can finish before the source is hit.
#[derive(Debug)]
pub struct IntervalTrigger {
    period: Duration,
    mode: RefreshMode,
}

impl IntervalTrigger {
    /// Fire every `period` in the given mode.
    #[must_use]
    pub const fn new(period: Duration, mode: RefreshMode) -> Self {
        Self { period, mode }
    }
}

#[async_trait]
impl RefreshTrigger for IntervalTrigger {
    async fn next_mode(&mut self) -> Option<RefreshMode> {
        tokio::time::sleep(self.period).await;
        Some(self.mode)
    }
}

impl Storico {
    /// Drive refresh cycles off a trigger until it yields `None`.
    ///
    /// Each cycle runs [`Storico::refresh_all`] in the mode the trigger
    /// chose. Per-series failures are contained in the per-cycle reports,
    /// so the loop itself never aborts; returns the number of cycles run.
    pub async fn run_scheduled(&self, trigger: &mut dyn RefreshTrigger) -> usize {
        let mut cycles = 0usize;
        while let Some(mode) = trigger.next_mode().await {
            let report = self.refresh_all(mode).await;
            cycles += 1;
            #[cfg(feature = "tracing")]
            tracing::info!(
                cycle = cycles,
                refreshed = report.outcomes.len(),
                failed = report.failures.len(),
                records_added = report.records_added_total(),
                "scheduled refresh cycle complete"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = report;
        }
        cycles
    }
}
