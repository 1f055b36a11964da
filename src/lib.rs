// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod acquire;
pub mod compose;
pub mod cycle;
pub mod dedup;
pub mod directory;
pub mod dispatch;
pub mod matcher;
pub mod normalize;
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::acquire::{FixtureReportSource, RawCondition, ReportSource, SourceReport};
pub use crate::cycle::{spawn_scheduler, CycleOrchestrator, CycleOutcome};
pub use crate::dedup::{Fingerprint, NotifiedStore};
pub use crate::directory::{StaticDirectory, SubscriberCriteria, SubscriberDirectory};
pub use crate::dispatch::{dispatch_for_subscriber, DispatchSummary};
pub use crate::normalize::Observation;
pub use crate::notify::{EmailChannel, SmsChannel, SmsGatewayChannel, SmtpEmailChannel};
