// src/compose.rs
use crate::normalize::Observation;

pub const ALERT_SUBJECT: &str = "Yoo, there are some waves! 🌊🌊";

const PLACEHOLDER: &str = "N/A";

/// HTML email body: one section per matched observation, in input order.
/// Callers guarantee `matches` is non-empty.
pub fn compose_long_form(matches: &[Observation]) -> String {
    let mut content = String::from("<h1>Yeaa 🤙🤙🌊</h1>");
    for m in matches {
        content.push_str(&format!("<h2>Praia 🏝️: {}</h2>", m.source_id));
        content.push_str(&format!("<p>Time ⏰: {}</p>", m.time_label));
        content.push_str(&format!(
            "<p>Wave Height 🌊: {}</p>",
            m.wave_height_text.as_deref().unwrap_or(PLACEHOLDER)
        ));
        content.push_str(&format!(
            "<p>Wind Speed 🌬️: {}</p>",
            m.wind_speed_text.as_deref().unwrap_or(PLACEHOLDER)
        ));
    }
    content.push_str(
        "<p>(flat and probably windy as always innit lol 😅) \
         check the spot's page for more deets.</p>",
    );
    content
}

/// Plain-text SMS body, same fields and ordering as the long form.
pub fn compose_short_form(matches: &[Observation]) -> String {
    let mut content = String::from("Looks like it's surfable! 🌊🏄\n");
    for m in matches {
        content.push_str(&format!("Praia 🏝️: {}\n", m.source_id));
        content.push_str(&format!("Time ⏰: {}\n", m.time_label));
        content.push_str(&format!(
            "Wave Height 🌊: {}\n",
            m.wave_height_text.as_deref().unwrap_or(PLACEHOLDER)
        ));
        content.push_str(&format!(
            "Wind Speed 🌬: {}\n\n",
            m.wind_speed_text.as_deref().unwrap_or(PLACEHOLDER)
        ));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(source: &str, time: &str, wave: Option<&str>, wind: Option<&str>) -> Observation {
        Observation {
            source_id: source.into(),
            time_label: time.into(),
            wave_height_value: Some(1.0),
            wave_height_text: wave.map(Into::into),
            wind_speed_text: wind.map(Into::into),
        }
    }

    #[test]
    fn long_form_renders_every_match_in_order() {
        let matches = vec![
            obs("supertubos", "now", Some("1.8m"), Some("12 km/h")),
            obs("guincho", "14h", Some("2.1m"), None),
        ];
        let html = compose_long_form(&matches);
        let first = html.find("supertubos").unwrap();
        let second = html.find("guincho").unwrap();
        assert!(first < second);
        assert!(html.contains("1.8m"));
        assert!(html.contains("12 km/h"));
        assert!(html.contains("2.1m"));
        // Missing wind falls back to the placeholder.
        assert!(html.contains("Wind Speed 🌬️: N/A"));
    }

    #[test]
    fn short_form_renders_fields_and_placeholders() {
        let matches = vec![obs("supertubos", "now", None, Some("20 km/h"))];
        let text = compose_short_form(&matches);
        assert!(text.contains("supertubos"));
        assert!(text.contains("now"));
        assert!(text.contains("Wave Height 🌊: N/A"));
        assert!(text.contains("20 km/h"));
    }

    #[test]
    fn composition_is_deterministic() {
        let matches = vec![obs("supertubos", "now", Some("1.8m"), Some("12 km/h"))];
        assert_eq!(compose_long_form(&matches), compose_long_form(&matches));
        assert_eq!(compose_short_form(&matches), compose_short_form(&matches));
    }
}
