// src/normalize.rs
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::acquire::types::SourceReport;

/// A normalized, numerically comparable measurement for one spot/time slot.
/// `wave_height_value` is what the matcher compares; the `_text` fields are
/// kept verbatim for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub source_id: String,
    pub time_label: String,
    pub wave_height_value: Option<f64>,
    pub wave_height_text: Option<String>,
    pub wind_speed_text: Option<String>,
}

/// Extract the first numeric run (digits, optional decimal point) from a
/// unit-suffixed measurement like `"1.5m"` or `"12 km/h"`. Absent or
/// non-numeric text yields `None`; malformed input is never an error.
pub fn parse_wave_height(text: Option<&str>) -> Option<f64> {
    let text = text?;
    static RE_NUM: OnceCell<Regex> = OnceCell::new();
    let re = RE_NUM.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
    re.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Turn one report into observations, dropping conditions whose wave height
/// does not parse. Dropped rows are never matched and never rendered.
pub fn normalize_report(report: &SourceReport) -> Vec<Observation> {
    report
        .raw_conditions
        .iter()
        .filter_map(|cond| {
            let value = parse_wave_height(cond.wave_height_text.as_deref())?;
            Some(Observation {
                source_id: report.source_id.clone(),
                time_label: cond.time_label.clone(),
                wave_height_value: Some(value),
                wave_height_text: cond.wave_height_text.clone(),
                wind_speed_text: cond.wind_speed_text.clone(),
            })
        })
        .collect()
}

/// Flatten a whole cycle's reports into one observation list, preserving
/// report order then condition order.
pub fn normalize_reports(reports: &[SourceReport]) -> Vec<Observation> {
    reports.iter().flat_map(normalize_report).collect()
}
