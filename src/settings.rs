use std::collections::HashMap;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "https://service-manual.ons.gov.uk/design-system/components";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub url: String,
}

impl Settings {
    /// Defaults overlaid with `ONS_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::build(None)
    }

    fn build(env: Option<HashMap<String, String>>) -> Result<Self> {
        Config::builder()
            .set_default("url", DEFAULT_URL)?
            .add_source(Environment::with_prefix("ONS").source(env))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ons_components_page() {
        let s = Settings::build(Some(HashMap::new())).unwrap();
        assert_eq!(s.url, DEFAULT_URL);
    }

    #[test]
    fn env_overrides_url() {
        let env = HashMap::from([("ONS_URL".to_string(), "http://localhost:8080/x".to_string())]);
        let s = Settings::build(Some(env)).unwrap();
        assert_eq!(s.url, "http://localhost:8080/x");
    }
}
