//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys split on `__`, e.g. `APP_PALETTE__DEBOUNCE_MS`).
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Like [`Config::load`], with the TOML files looked up under `base`.
    pub fn load_from(base: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[palette]` section, defaulted when absent and validated.
    pub fn palette(&self) -> anyhow::Result<PaletteSettings> {
        let settings = if self.figment.contains("palette") {
            self.get::<PaletteSettings>("palette")?
        } else {
            PaletteSettings::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Tunables of the search palette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteSettings {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub max_query_chars: usize,
    pub remote_limit: usize,
    pub result_limit: usize,
    pub trending_limit: usize,
    pub detail_path_prefix: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_chars: 2,
            max_query_chars: 100,
            remote_limit: 20,
            result_limit: 10,
            trending_limit: 5,
            detail_path_prefix: "/show/".to_string(),
        }
    }
}

impl PaletteSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_query_chars == 0 {
            return Err(Error::InvalidConfig("palette.max_query_chars must be positive".into()));
        }
        if self.min_query_chars > self.max_query_chars {
            return Err(Error::InvalidConfig(format!(
                "palette.min_query_chars ({}) exceeds max_query_chars ({})",
                self.min_query_chars, self.max_query_chars
            )));
        }
        if self.remote_limit == 0 || self.result_limit == 0 {
            return Err(Error::InvalidConfig("palette limits must be positive".into()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string: leading `~` becomes the home directory,
/// `${VAR}` and `$VAR` are substituted. The result is not canonicalized.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&with_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve `p` against `base` after expansion, unless it is already absolute.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
