// src/dispatch.rs
use chrono::NaiveDate;
use metrics::counter;

use crate::compose::{compose_long_form, compose_short_form, ALERT_SUBJECT};
use crate::dedup::{Fingerprint, NotifiedStore};
use crate::directory::SubscriberCriteria;
use crate::matcher::match_observations;
use crate::normalize::Observation;
use crate::notify::{EmailChannel, SmsChannel};

/// What happened for one subscriber in one cycle. Logged by the orchestrator
/// and asserted on by tests; `None` channel outcomes mean "not attempted".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchSummary {
    pub skipped_opt_out: bool,
    pub matched: usize,
    pub new_matches: usize,
    pub email_sent: Option<bool>,
    pub sms_sent: Option<bool>,
}

/// Run the match → dedup-filter → compose → deliver pipeline for one
/// subscriber.
///
/// Channel failures are logged and isolated: email and SMS run concurrently
/// and neither outcome affects the other. Every newly matched fingerprint is
/// marked notified even when delivery fails, so the same event is not retried
/// later the same day (carried over from the original service).
pub async fn dispatch_for_subscriber(
    subscriber: &SubscriberCriteria,
    observations: &[Observation],
    today: NaiveDate,
    store: &mut NotifiedStore,
    email: &dyn EmailChannel,
    sms: &dyn SmsChannel,
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    if subscriber.opted_out {
        tracing::debug!(
            subscriber = %subscriber.subscriber_id,
            "subscriber has opted out of notifications"
        );
        summary.skipped_opt_out = true;
        return summary;
    }

    let matches = match_observations(observations, subscriber);
    summary.matched = matches.len();

    // Filter to fingerprints not yet dispatched today, strictly before any
    // mark_notified for this batch.
    let fresh: Vec<(Observation, Fingerprint)> = matches
        .into_iter()
        .map(|obs| {
            let fp = Fingerprint::of(&obs, today);
            (obs, fp)
        })
        .filter(|(_, fp)| store.is_new(&subscriber.subscriber_id, fp))
        .collect();
    summary.new_matches = fresh.len();

    if fresh.is_empty() {
        return summary;
    }

    let fresh_obs: Vec<Observation> = fresh.iter().map(|(obs, _)| obs.clone()).collect();
    let body_html = compose_long_form(&fresh_obs);
    let body_text = compose_short_form(&fresh_obs);

    let email_fut = async {
        match email
            .send(&subscriber.email_address, ALERT_SUBJECT, &body_html)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    subscriber = %subscriber.subscriber_id,
                    to = %subscriber.email_address,
                    "alert email sent"
                );
                true
            }
            Err(e) => {
                counter!("alert_email_failures_total").increment(1);
                tracing::warn!(
                    subscriber = %subscriber.subscriber_id,
                    error = ?e,
                    "alert email failed"
                );
                false
            }
        }
    };

    let sms_fut = async {
        let Some(phone) = subscriber.phone_number.as_deref() else {
            return None;
        };
        match sms.send(phone, &body_text).await {
            Ok(()) => {
                tracing::info!(subscriber = %subscriber.subscriber_id, "alert SMS sent");
                Some(true)
            }
            Err(e) => {
                counter!("alert_sms_failures_total").increment(1);
                tracing::warn!(
                    subscriber = %subscriber.subscriber_id,
                    error = ?e,
                    "alert SMS failed"
                );
                Some(false)
            }
        }
    };

    // Independent failure domains: run both channels concurrently.
    let (email_ok, sms_ok) = tokio::join!(email_fut, sms_fut);
    summary.email_sent = Some(email_ok);
    summary.sms_sent = sms_ok;

    for (_, fp) in fresh {
        store.mark_notified(&subscriber.subscriber_id, fp);
    }
    counter!("alert_notifications_total").increment(summary.new_matches as u64);

    summary
}
