// src/acquire/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "SURF_SPOTS_PATH";

/// Load the monitored-spot list from an explicit path. TOML or JSON.
pub fn load_spots_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading spot list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_spots(&content, ext.as_str())
}

/// Load the spot list using env var + fallbacks:
/// 1) $SURF_SPOTS_PATH
/// 2) config/spots.toml
/// 3) config/spots.json
pub fn load_spots_default() -> Result<Vec<String>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_spots_from(&pb);
        }
        return Err(anyhow!("SURF_SPOTS_PATH points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/spots.toml");
    if toml_p.exists() {
        return load_spots_from(&toml_p);
    }
    let json_p = PathBuf::from("config/spots.json");
    if json_p.exists() {
        return load_spots_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_spots(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    if hint_ext == "toml" || s.contains("spots") {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if let Ok(v) = parse_toml(s) {
        return Ok(v);
    }
    Err(anyhow!("unsupported spot list format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlSpots {
        spots: Vec<String>,
    }
    let v: TomlSpots = toml::from_str(s)?;
    Ok(clean_list(v.spots))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim entries, drop empties, keep first occurrence order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|s| s == t) {
            out.push(t.to_string());
        }
    }
    out
}
