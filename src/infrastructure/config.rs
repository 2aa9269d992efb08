use crate::domain::validation::PfOmRule;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/setting_calculator";
const ENV_PREFIX: &str = "SETTING_CALC";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub liners: LinerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ValidationSettings {
    #[serde(default)]
    pub pf_om_rule: PfOmRule,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinerSource {
    #[default]
    Catalog,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinerSettings {
    #[serde(default)]
    pub source: LinerSource,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Default for LinerSettings {
    fn default() -> Self {
        Self {
            source: LinerSource::default(),
            catalog_path: default_catalog_path(),
            base_url: None,
            token: None,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_catalog_path() -> String {
    "config/liners.toml".to_string()
}

/// Load `config/setting_calculator.*` (optional) overlaid with
/// `SETTING_CALC__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_with_file(config::File::with_name(CONFIG_FILE).required(false))
}

fn load_with_file<S>(file: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
