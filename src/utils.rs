use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub const DEFAULT_SERVICES: [&str; 2] = ["Electrolysis", "Permanent Hair Removal"];

/// Clean a pre-supplied slug: drop one leading `/` and anything from `?` on.
/// Blank input means "no slug supplied".
pub fn clean_slug(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let path = raw.strip_prefix('/').unwrap_or(raw);
    let path = path.split('?').next().unwrap_or_default();
    Some(path.to_string())
}

/// `Smooth Skin Spa`, 7 → `smooth-skin-spa-7`.
pub fn title_slug(title: &str, id: i64) -> String {
    let lower = title.to_lowercase();
    format!("{}-{}", NON_ALNUM_RE.replace_all(&lower, "-"), id)
}

/// Lower-case a place name and turn whitespace runs into dashes.
pub fn dash_lower(name: &str) -> String {
    WHITESPACE_RE.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// First two characters of a state name; used for city slugs and state codes.
pub fn state_prefix(state: &str) -> String {
    state.chars().take(2).collect()
}

pub fn split_services(raw: &str) -> Vec<String> {
    let services: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if services.is_empty() {
        DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect()
    } else {
        services
    }
}

/// Integer coercion for CSV cells. Blank or unparsable values become 0;
/// decimal values are truncated.
pub fn parse_int(raw: &str) -> i64 {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(0)
}

pub fn parse_float(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}
