// src/matcher.rs
use crate::directory::SubscriberCriteria;
use crate::normalize::Observation;

/// Stable filter: keep observations whose wave height meets the subscriber's
/// threshold, in input order. Observations without a numeric value are
/// re-checked here even though the normalizer already drops them.
pub fn match_observations(
    observations: &[Observation],
    criteria: &SubscriberCriteria,
) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| matches!(o.wave_height_value, Some(v) if v >= criteria.min_wave_height))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(source: &str, time: &str, value: Option<f64>) -> Observation {
        Observation {
            source_id: source.into(),
            time_label: time.into(),
            wave_height_value: value,
            wave_height_text: value.map(|v| format!("{v}m")),
            wind_speed_text: None,
        }
    }

    fn criteria(min: f64) -> SubscriberCriteria {
        SubscriberCriteria {
            subscriber_id: "arnaldo".into(),
            email_address: "arnaldo@example.com".into(),
            phone_number: None,
            min_wave_height: min,
            opted_out: false,
        }
    }

    #[test]
    fn keeps_at_or_above_threshold_in_order() {
        let observations = vec![
            obs("a", "now", Some(0.4)),
            obs("b", "now", Some(0.5)),
            obs("c", "now", Some(1.2)),
        ];
        let matched = match_observations(&observations, &criteria(0.5));
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].source_id, "b");
        assert_eq!(matched[1].source_id, "c");
    }

    #[test]
    fn missing_value_never_matches() {
        let observations = vec![obs("a", "now", None)];
        assert!(match_observations(&observations, &criteria(0.0)).is_empty());
    }

    #[test]
    fn matching_is_idempotent() {
        let observations = vec![obs("a", "now", Some(1.0)), obs("b", "14h", Some(2.0))];
        let first = match_observations(&observations, &criteria(0.5));
        let second = match_observations(&observations, &criteria(0.5));
        assert_eq!(first, second);
    }
}
