// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use tracing::info;

/// When a feed URL gets the `_=<millis>` cache-busting parameter.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheBust {
    Always,
    Never,
    /// Only for `docs.google.com` hosts.
    GoogleSheets,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
    pub cache_bust: CacheBust,
    /// Route the fetch through the retry policy.
    #[serde(default)]
    pub retry: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Feeds {
    pub profiles: FeedSource,
    pub comparisons: FeedSource,
    pub factchecks: FeedSource,
    pub density: FeedSource,
}

impl Default for Feeds {
    fn default() -> Self {
        Self {
            profiles: FeedSource {
                url: "https://docs.google.com/spreadsheets/d/e/2PACX-1vR_yZQbmqUse6lOcFRxBhP53YkC3CdIc36YcOE3bk-w_91-TVudDvH9uVuJoSMZwf_4bPPuq--qbHKb/pub?output=csv".into(),
                cache_bust: CacheBust::Always,
                retry: false,
            },
            comparisons: FeedSource {
                url: "https://docs.google.com/spreadsheets/d/e/2PACX-1vRcgvr6YP_YLsgXS9-mJD34bBug-Qzlv8W_d3ZacfQhYcM-7u85u-U6TCl8S9rsBDVPD8Ck5mMsYNxW/pub?output=csv".into(),
                cache_bust: CacheBust::Always,
                retry: true,
            },
            factchecks: FeedSource {
                url: "https://docs.google.com/spreadsheets/d/1IV5othVVZ0udcHWXN5Tfv5UDsDRPjHcJDz4X6BWGiV8/export?format=csv".into(),
                cache_bust: CacheBust::GoogleSheets,
                retry: false,
            },
            density: FeedSource {
                url: "https://nuevasnarrativasec.github.io/planes-de-gobierno-2026/data/densidad-data.json?v3".into(),
                cache_bust: CacheBust::Never,
                retry: true,
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub feeds: Feeds,
    pub retry: RetrySettings,
    pub http: HttpSettings,
}

impl Config {
    /// Defaults, or a YAML file layered over them when `path` is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let cfg: Config =
            serde_yaml::from_str(&text).with_context(|| format!("parsing config {:?}", path))?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}

/// A discourse theme of the density view and comparison grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
}

pub static THEMES: &[Theme] = &[
    Theme { id: "agricultura", name: "AGRICULTURA" },
    Theme { id: "medio_ambiente", name: "AMBIENTE" },
    Theme { id: "cambio_climatico", name: "CAMBIO CLIMATICO" },
    Theme { id: "cultura_turismo", name: "CULTURA Y TURISMO" },
    Theme { id: "descentralizacion", name: "DESCENTRALIZACION" },
    Theme { id: "economia", name: "ECONOMIA" },
    Theme { id: "educacion", name: "EDUCACION" },
    Theme { id: "energia_minera", name: "ENERGIA MINERA" },
    Theme { id: "familia", name: "FAMILIA" },
    Theme { id: "gobernanza_digital", name: "GOBERNANZA DIGITAL" },
    Theme { id: "infraestructura", name: "INFRAESTRUCTURA" },
    Theme { id: "justicia_dh", name: "JUSTICIA" },
    Theme { id: "programas_sociales", name: "PROGRAMAS SOCIALES" },
    Theme { id: "salud", name: "SALUD" },
    Theme { id: "seguridad", name: "SEGURIDAD" },
    Theme { id: "transporte", name: "TRANSPORTE" },
    Theme { id: "vivienda", name: "VIVIENDA" },
];

/// TRANSPORTE
pub const DEFAULT_THEME_INDEX: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = Config::load(None).unwrap();
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.retry.delay_ms, 1000);
        assert_eq!(cfg.feeds.factchecks.cache_bust, CacheBust::GoogleSheets);
        assert!(cfg.feeds.density.retry);
        assert_eq!(THEMES[DEFAULT_THEME_INDEX].id, "transporte");
        assert_eq!(THEMES.len(), 17);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(
            f,
            "retry:\n  delay_ms: 250\nfeeds:\n  density:\n    url: http://localhost/d.json\n    cache_bust: always\n"
        )?;
        let cfg = Config::load(Some(f.path()))?;
        assert_eq!(cfg.retry.delay_ms, 250);
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.feeds.density.url, "http://localhost/d.json");
        assert_eq!(cfg.feeds.density.cache_bust, CacheBust::Always);
        assert!(!cfg.feeds.density.retry);
        assert_eq!(cfg.feeds.profiles, Feeds::default().profiles);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/planes.yaml"))).is_err());
    }
}
