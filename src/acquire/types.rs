// src/acquire/types.rs
use anyhow::Result;

/// One scraped condition row for a spot: the live reading (`time_label ==
/// "now"`) or a forecast slot. Textual fields arrive as-is from the source
/// and may be missing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct RawCondition {
    pub time_label: String,
    pub wave_height_text: Option<String>,
    pub wind_speed_text: Option<String>,
}

/// Everything the acquisition collaborator returned for one spot in one cycle.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SourceReport {
    pub source_id: String,
    pub raw_conditions: Vec<RawCondition>,
}

/// Acquisition collaborator. Owns its own retry/timeout policy. May return
/// fewer reports than requested spots; a spot that failed entirely is simply
/// absent from the result and is treated as "no observations".
#[async_trait::async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_reports(&self, source_ids: &[String]) -> Result<Vec<SourceReport>>;
    fn name(&self) -> &'static str;
}
