use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub seed_demo_data: bool,
    pub featured_limit: usize,
    pub stats_investments: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            seed_demo_data: true,
            featured_limit: 8,
            stats_investments: "$2.3M".into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: get("APP_HOST").unwrap_or(defaults.host),
            port: match get("APP_PORT") {
                Some(v) => v.parse().with_context(|| format!("APP_PORT={v}"))?,
                None => defaults.port,
            },
            seed_demo_data: match get("SEED_DEMO_DATA") {
                Some(v) => parse_bool(&v).with_context(|| format!("SEED_DEMO_DATA={v}"))?,
                None => defaults.seed_demo_data,
            },
            featured_limit: match get("FEATURED_LIMIT") {
                Some(v) => v.parse().with_context(|| format!("FEATURED_LIMIT={v}"))?,
                None => defaults.featured_limit,
            },
            stats_investments: get("STATS_INVESTMENTS").unwrap_or(defaults.stats_investments),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("parse listen address")
    }
}

fn parse_bool(v: &str) -> anyhow::Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.seed_demo_data);
        assert_eq!(cfg.featured_limit, 8);
        assert_eq!(cfg.stats_investments, "$2.3M");
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "3000"),
            ("SEED_DEMO_DATA", "off"),
            ("FEATURED_LIMIT", "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:3000");
        assert!(!cfg.seed_demo_data);
        assert_eq!(cfg.featured_limit, 3);
    }

    #[test]
    fn bad_values_fail_with_the_key() {
        let err = AppConfig::from_lookup(lookup(&[("APP_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));

        let err = AppConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("SEED_DEMO_DATA"));
    }
}
