// src/acquire/fixture.rs
use anyhow::{Context, Result};
use std::path::Path;

use super::types::{ReportSource, SourceReport};

/// Canned acquisition source backed by a JSON document. Stands in for the
/// real scraper in the demo binary and in tests.
pub struct FixtureReportSource {
    reports: Vec<SourceReport>,
}

impl FixtureReportSource {
    pub fn from_json(json: &str) -> Result<Self> {
        let reports: Vec<SourceReport> =
            serde_json::from_str(json).context("parse report fixture JSON")?;
        Ok(Self { reports })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading report fixture from {}", path.display()))?;
        Self::from_json(&content)
    }
}

#[async_trait::async_trait]
impl ReportSource for FixtureReportSource {
    async fn fetch_reports(&self, source_ids: &[String]) -> Result<Vec<SourceReport>> {
        // Only hand back reports that were actually requested, preserving
        // fixture order. Unknown ids behave like a spot that failed upstream.
        Ok(self
            .reports
            .iter()
            .filter(|r| source_ids.iter().any(|id| id == &r.source_id))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
