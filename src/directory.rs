// src/directory.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "SURF_SUBSCRIBERS_PATH";

/// One subscriber's alert criteria, authoritative for a single cycle only.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct SubscriberCriteria {
    pub subscriber_id: String,
    pub email_address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub min_wave_height: f64,
    #[serde(default)]
    pub opted_out: bool,
}

/// Subscriber-directory collaborator. Returns a fresh snapshot; the engine
/// never caches or diffs across cycles.
#[async_trait::async_trait]
pub trait SubscriberDirectory: Send + Sync {
    async fn list_subscribers(&self) -> Result<Vec<SubscriberCriteria>>;
}

/// File-backed directory (TOML `[[subscribers]]` tables or a JSON array).
pub struct StaticDirectory {
    subscribers: Vec<SubscriberCriteria>,
}

impl StaticDirectory {
    pub fn new(subscribers: Vec<SubscriberCriteria>) -> Self {
        Self { subscribers }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading subscribers from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Ok(Self::new(parse_subscribers(&content, ext.as_str())?))
    }

    /// Env var + fallbacks:
    /// 1) $SURF_SUBSCRIBERS_PATH
    /// 2) config/subscribers.toml
    /// 3) config/subscribers.json
    pub fn from_default_path() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::from_path(&pb);
            }
            return Err(anyhow!("SURF_SUBSCRIBERS_PATH points to non-existent path"));
        }
        let toml_p = PathBuf::from("config/subscribers.toml");
        if toml_p.exists() {
            return Self::from_path(&toml_p);
        }
        let json_p = PathBuf::from("config/subscribers.json");
        if json_p.exists() {
            return Self::from_path(&json_p);
        }
        Ok(Self::new(Vec::new()))
    }
}

#[async_trait::async_trait]
impl SubscriberDirectory for StaticDirectory {
    async fn list_subscribers(&self) -> Result<Vec<SubscriberCriteria>> {
        Ok(self.subscribers.clone())
    }
}

fn parse_subscribers(s: &str, hint_ext: &str) -> Result<Vec<SubscriberCriteria>> {
    #[derive(serde::Deserialize)]
    struct TomlSubs {
        subscribers: Vec<SubscriberCriteria>,
    }
    if hint_ext == "toml" || s.contains("[[subscribers]]") {
        if let Ok(v) = toml::from_str::<TomlSubs>(s) {
            return Ok(v.subscribers);
        }
    }
    if let Ok(v) = serde_json::from_str::<Vec<SubscriberCriteria>>(s) {
        return Ok(v);
    }
    if let Ok(v) = toml::from_str::<TomlSubs>(s) {
        return Ok(v.subscribers);
    }
    Err(anyhow!("unsupported subscribers format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_subscribers_parse() {
        let toml = r#"
            [[subscribers]]
            subscriber_id = "arnaldo"
            email_address = "arnaldo@example.com"
            phone_number = "+351910000000"
            min_wave_height = 0.5

            [[subscribers]]
            subscriber_id = "rita"
            email_address = "rita@example.com"
            min_wave_height = 1.5
            opted_out = true
        "#;
        let subs = parse_subscribers(toml, "toml").unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].subscriber_id, "arnaldo");
        assert_eq!(subs[0].phone_number.as_deref(), Some("+351910000000"));
        assert!(!subs[0].opted_out);
        assert!(subs[1].phone_number.is_none());
        assert!(subs[1].opted_out);
    }

    #[test]
    fn json_subscribers_parse() {
        let json = r#"[
            { "subscriber_id": "arnaldo", "email_address": "arnaldo@example.com", "min_wave_height": 0.5 }
        ]"#;
        let subs = parse_subscribers(json, "json").unwrap();
        assert_eq!(subs.len(), 1);
        assert!(subs[0].phone_number.is_none());
        assert!(!subs[0].opted_out);
    }

    #[tokio::test]
    async fn static_directory_returns_snapshot() {
        let dir = StaticDirectory::new(vec![SubscriberCriteria {
            subscriber_id: "arnaldo".into(),
            email_address: "arnaldo@example.com".into(),
            phone_number: None,
            min_wave_height: 0.5,
            opted_out: false,
        }]);
        let subs = dir.list_subscribers().await.unwrap();
        assert_eq!(subs.len(), 1);
    }
}
