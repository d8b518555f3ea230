use crate::domain::log_record::DEFAULT_COMPONENTS;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub logs: LogSettings,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    /// Directory holding one `<hatchet>.json` document per dataset
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub page_size: usize,
    pub components: Vec<String>,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.logs.page_size == 0 {
            anyhow::bail!("logs.page_size must be greater than zero");
        }
        Ok(())
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "hatchet_dashboard=debug,tower_http=debug"
        } else {
            "hatchet_dashboard=info,tower_http=info"
        }
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind", "127.0.0.1:3721")?
        .set_default("data.dir", "data")?
        .set_default("logs.page_size", 100_i64)?
        .set_default("logs.components", DEFAULT_COMPONENTS.to_vec())?
        .set_default("verbose", false)?)
}

/// Defaults, then `config/hatchet.*`, then `HATCHET__*` environment variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/hatchet").required(false))
        .add_source(
            config::Environment::with_prefix("HATCHET")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

pub fn load_app_config_from_str(toml: &str) -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
