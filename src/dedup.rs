// src/dedup.rs
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::normalize::Observation;

/// Identifies one notification event: "this source's this-time-label
/// observation, on this calendar day". The embedded date is what lets the
/// store rotate stale entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub date: NaiveDate,
    pub source_id: String,
    pub time_label: String,
}

impl Fingerprint {
    pub fn of(observation: &Observation, date: NaiveDate) -> Self {
        Self {
            date,
            source_id: observation.source_id.clone(),
            time_label: observation.time_label.clone(),
        }
    }
}

/// Per-subscriber record of already-dispatched events.
/// - Reads never count as "already notified" for unseen subscribers.
/// - `filter_new` must run before `mark_notified` for the same batch; the
///   dispatch coordinator owns that ordering.
/// - Volatile: created empty at process start, discarded on shutdown.
#[derive(Debug, Default)]
pub struct NotifiedStore {
    notified: HashMap<String, HashSet<Fingerprint>>,
}

impl NotifiedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff this subscriber has not been notified for this event today.
    pub fn is_new(&self, subscriber_id: &str, fingerprint: &Fingerprint) -> bool {
        self.notified
            .get(subscriber_id)
            .map_or(true, |set| !set.contains(fingerprint))
    }

    /// Idempotent insert.
    pub fn mark_notified(&mut self, subscriber_id: &str, fingerprint: Fingerprint) {
        self.notified
            .entry(subscriber_id.to_string())
            .or_default()
            .insert(fingerprint);
    }

    /// The subset of `fingerprints` not yet marked for this subscriber,
    /// in input order.
    pub fn filter_new(
        &self,
        subscriber_id: &str,
        fingerprints: Vec<Fingerprint>,
    ) -> Vec<Fingerprint> {
        fingerprints
            .into_iter()
            .filter(|fp| self.is_new(subscriber_id, fp))
            .collect()
    }

    /// Drop every fingerprint whose embedded date is not `today`, bounding
    /// memory to one day's worth of events. Called once per cycle.
    pub fn rotate(&mut self, today: NaiveDate) {
        for set in self.notified.values_mut() {
            set.retain(|fp| fp.date == today);
        }
        self.notified.retain(|_, set| !set.is_empty());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.notified.values().map(HashSet::len).sum()
    }
}
