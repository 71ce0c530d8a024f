use std::path::PathBuf;

use clap::Args;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SITEGEN";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Directory holding the CSV exports.
    pub data_dir: PathBuf,
    /// Directory the JSON payloads and sitemap are written to.
    pub out_dir: PathBuf,
    /// Category that defines the directory.
    pub category: String,
    /// Public origin used for sitemap URLs.
    pub site_url: String,
    pub sitemap: bool,
}

/// Command-line flags layered over environment and defaults.
#[derive(Debug, Default, Clone, Args)]
pub struct Overrides {
    /// CSV input directory [env: SITEGEN_DATA_DIR, default: data]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Output directory [env: SITEGEN_OUT_DIR, default: src/data]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Target category name, case-insensitive [env: SITEGEN_CATEGORY]
    #[arg(long)]
    pub category: Option<String>,
    /// Site origin for sitemap.xml [env: SITEGEN_SITE_URL]
    #[arg(long)]
    pub site_url: Option<String>,
    /// Skip writing sitemap.xml
    #[arg(long)]
    pub no_sitemap: bool,
}

impl Settings {
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        Ok(Self::from_env(env)?.apply(overrides))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("data_dir", "data")?
            .set_default("out_dir", "src/data")?
            .set_default("category", "Electrolysis")?
            .set_default("site_url", "https://example.com")?
            .set_default("sitemap", true)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    fn apply(mut self, o: &Overrides) -> Self {
        if let Some(dir) = &o.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(dir) = &o.out_dir {
            self.out_dir = dir.clone();
        }
        if let Some(category) = &o.category {
            self.category = category.clone();
        }
        if let Some(url) = &o.site_url {
            self.site_url = url.clone();
        }
        if o.no_sitemap {
            self.sitemap = false;
        }
        self
    }

    /// Site origin when the sitemap is enabled.
    pub fn sitemap_url(&self) -> Option<&str> {
        self.sitemap.then_some(self.site_url.as_str())
    }
}
