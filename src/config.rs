//! Page configuration. Every field has a default, so an empty JSON object
//! (or no config at all) gives the stock homepage.

use serde::Deserialize;

use crate::particles::ResizePolicy;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HomepageConfig {
    pub quote_endpoint: String,
    pub ip_endpoint: String,
    pub background_endpoint: String,
    /// Refresh period of the main-page quote.
    pub quote_refresh_ms: i32,
    /// Delay between characters of the loading-screen typewriter.
    pub typewriter_speed_ms: i32,
    /// Pause after the loading quote finishes, before the main page shows.
    pub loading_hold_ms: i32,
    /// Seasonal particles (by month) or the single plain variant.
    pub seasonal: bool,
    /// Fixed seed for the particle field; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub resize_policy: ResizePolicy,
    pub log_level: String,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            quote_endpoint: "https://v1.hitokoto.cn/".into(),
            ip_endpoint: "https://update.cz88.net/api/cz88/ip/base?ip".into(),
            background_endpoint: "https://www.dmoe.cc/random.php".into(),
            quote_refresh_ms: 60_000,
            typewriter_speed_ms: 50,
            loading_hold_ms: 1_000,
            seasonal: true,
            seed: None,
            resize_policy: ResizePolicy::KeepPositions,
            log_level: "info".into(),
        }
    }
}

impl HomepageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `log_level` parsed as a `log::Level`; unknown names fall back to info.
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Background image URL with a cache-busting timestamp.
    pub fn background_url(&self, now_ms: f64) -> String {
        format!("{}?t={}", self.background_endpoint, now_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = HomepageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, HomepageConfig::default());
        assert_eq!(cfg.quote_refresh_ms, 60_000);
        assert!(cfg.seasonal);
        assert_eq!(cfg.resize_policy, ResizePolicy::KeepPositions);
    }

    #[test]
    fn partial_override() {
        let cfg = HomepageConfig::from_json(
            r#"{"seasonal": false, "seed": 42, "resize_policy": "resample_out_of_bounds", "log_level": "debug"}"#,
        )
        .unwrap();
        assert!(!cfg.seasonal);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.resize_policy, ResizePolicy::ResampleOutOfBounds);
        assert_eq!(cfg.level(), log::Level::Debug);
        assert_eq!(cfg.typewriter_speed_ms, 50);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(HomepageConfig::from_json(r#"{"resize_policy": "stretch"}"#).is_err());
        assert!(HomepageConfig::from_json("not json").is_err());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = HomepageConfig { log_level: "loud".into(), ..Default::default() };
        assert_eq!(cfg.level(), log::Level::Info);
    }

    #[test]
    fn background_url_has_timestamp() {
        let cfg = HomepageConfig::default();
        assert_eq!(cfg.background_url(1_700_000_000_123.7), "https://www.dmoe.cc/random.php?t=1700000000123");
    }
}
