// src/acquire/mod.rs
pub mod config;
pub mod fixture;
pub mod types;

pub use fixture::FixtureReportSource;
pub use types::{RawCondition, ReportSource, SourceReport};
