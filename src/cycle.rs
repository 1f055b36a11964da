// src/cycle.rs
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::acquire::types::ReportSource;
use crate::dedup::NotifiedStore;
use crate::directory::SubscriberDirectory;
use crate::dispatch::dispatch_for_subscriber;
use crate::normalize::normalize_reports;
use crate::notify::{EmailChannel, SmsChannel};

/// One-time metrics registration (so series show up on scrape).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("alert_cycles_total", "Completed evaluation cycles.");
        describe_counter!(
            "alert_cycle_ticks_rejected_total",
            "Ticks rejected because a cycle was already running."
        );
        describe_counter!(
            "alert_notifications_total",
            "Newly fingerprinted events dispatched to subscribers."
        );
        describe_counter!("alert_email_failures_total", "Failed email deliveries.");
        describe_counter!("alert_sms_failures_total", "Failed SMS deliveries.");
        describe_gauge!("alert_cycle_last_run_ts", "Unix ts when a cycle last ran.");
    });
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Cycle ran to completion across all subscribers.
    Completed { subscribers: usize, dispatched: usize },
    /// A cycle was already in flight; this tick did nothing.
    Rejected,
}

/// Top-level per-tick procedure. Holds the only mutable state in the engine
/// (the dedup store) behind a mutex so ticks never interleave: a tick that
/// fires mid-cycle is rejected outright, never queued or partially run.
pub struct CycleOrchestrator {
    source: Arc<dyn ReportSource>,
    directory: Arc<dyn SubscriberDirectory>,
    email: Arc<dyn EmailChannel>,
    sms: Arc<dyn SmsChannel>,
    spots: Vec<String>,
    store: Mutex<NotifiedStore>,
}

impl CycleOrchestrator {
    pub fn new(
        source: Arc<dyn ReportSource>,
        directory: Arc<dyn SubscriberDirectory>,
        email: Arc<dyn EmailChannel>,
        sms: Arc<dyn SmsChannel>,
        spots: Vec<String>,
    ) -> Self {
        Self {
            source,
            directory,
            email,
            sms,
            spots,
            store: Mutex::new(NotifiedStore::new()),
        }
    }

    /// Entry point for the scheduler: runs one cycle dated "today", or
    /// rejects the tick if one is already running.
    pub async fn try_run_cycle(&self) -> Result<CycleOutcome> {
        ensure_metrics_described();
        let Ok(mut store) = self.store.try_lock() else {
            counter!("alert_cycle_ticks_rejected_total").increment(1);
            tracing::warn!("cycle already in flight; tick rejected");
            return Ok(CycleOutcome::Rejected);
        };
        self.run_locked(&mut store, Utc::now().date_naive()).await
    }

    /// Run one cycle for an explicit calendar date. Waits for any in-flight
    /// cycle instead of rejecting; used by tests to drive consecutive cycles
    /// with an injected clock.
    pub async fn run_cycle_for_date(&self, today: NaiveDate) -> Result<CycleOutcome> {
        ensure_metrics_described();
        let mut store = self.store.lock().await;
        self.run_locked(&mut store, today).await
    }

    async fn run_locked(
        &self,
        store: &mut NotifiedStore,
        today: NaiveDate,
    ) -> Result<CycleOutcome> {
        tracing::info!(date = %today, spots = self.spots.len(), "running alert cycle");

        store.rotate(today);

        // Acquisition failure degrades to zero observations; the cycle
        // still runs so subscribers and the store stay consistent.
        let reports = match self.source.fetch_reports(&self.spots).await {
            Ok(reports) => reports,
            Err(e) => {
                tracing::warn!(source = self.source.name(), error = ?e, "acquisition failed");
                Vec::new()
            }
        };

        // Directory failure aborts the whole cycle; the next tick retries.
        let subscribers = self
            .directory
            .list_subscribers()
            .await
            .context("list subscribers")?;

        let observations = normalize_reports(&reports);
        tracing::debug!(
            reports = reports.len(),
            observations = observations.len(),
            subscribers = subscribers.len(),
            "cycle inputs normalized"
        );

        let mut dispatched = 0usize;
        for subscriber in &subscribers {
            let summary = dispatch_for_subscriber(
                subscriber,
                &observations,
                today,
                store,
                self.email.as_ref(),
                self.sms.as_ref(),
            )
            .await;
            tracing::info!(
                subscriber = %subscriber.subscriber_id,
                matched = summary.matched,
                new = summary.new_matches,
                email = ?summary.email_sent,
                sms = ?summary.sms_sent,
                "subscriber evaluated"
            );
            dispatched += summary.new_matches;
        }

        counter!("alert_cycles_total").increment(1);
        gauge!("alert_cycle_last_run_ts").set(Utc::now().timestamp().max(0) as f64);

        Ok(CycleOutcome::Completed {
            subscribers: subscribers.len(),
            dispatched,
        })
    }
}

/// Spawn the periodic trigger: one cycle immediately (the interval's first
/// tick fires at once, matching the original run-at-startup behavior), then
/// one per `interval_secs`.
pub fn spawn_scheduler(orchestrator: Arc<CycleOrchestrator>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            match orchestrator.try_run_cycle().await {
                Ok(CycleOutcome::Completed {
                    subscribers,
                    dispatched,
                }) => {
                    tracing::info!(subscribers, dispatched, "cycle tick finished");
                }
                Ok(CycleOutcome::Rejected) => {}
                Err(e) => {
                    tracing::warn!(error = ?e, "cycle tick failed");
                }
            }
        }
    })
}
