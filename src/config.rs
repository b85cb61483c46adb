use std::time::Duration;

use clap::Args;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Configuration flags shared by every harness command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// Server base URL
    #[arg(long, env = "CHIREC_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ConfigOnly {
    #[command(flatten)]
    args: ConfigArgs,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub flash_dismiss_ms: u64,
    pub toast_lifetime_ms: u64,
    pub fade_ms: u64,
    pub scroll_threshold_px: f64,
    pub badge_cap: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::Parser as _;

        let cli = ConfigOnly::try_parse_from(args)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::load_with(&cli.args)
    }

    /// Build the configuration from already parsed flags.
    ///
    /// Priority: CLI flag > `CHIREC_` environment > config file > defaults.
    pub fn load_with(args: &ConfigArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("client.base_url", "http://127.0.0.1:5000")?
            .set_default("ui.flash_dismiss_ms", 5000)?
            .set_default("ui.toast_lifetime_ms", 5000)?
            .set_default("ui.fade_ms", 300)?
            .set_default("ui.scroll_threshold_px", 100.0)?
            .set_default("ui.badge_cap", 99)?;

        // Explicit file must exist; ./config.{yaml,toml,json} is optional.
        builder = match &args.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. CHIREC_CLIENT__BASE_URL=http://localhost:8000
        builder = builder.add_source(
            Environment::with_prefix("CHIREC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = &args.base_url {
            builder = builder.set_override("client.base_url", url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}

/// Runtime timing and layout knobs of the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    /// Delay before server-rendered flash messages fade out.
    pub flash_dismiss_delay: Duration,
    /// How long a toast stays fully visible.
    pub toast_lifetime: Duration,
    /// Opacity transition before an element is removed.
    pub fade_duration: Duration,
    /// Distance from the bottom of the feed that triggers the next page.
    pub scroll_threshold_px: f64,
    /// Largest unread count shown literally on the badge.
    pub badge_cap: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            flash_dismiss_delay: Duration::from_millis(5000),
            toast_lifetime: Duration::from_millis(5000),
            fade_duration: Duration::from_millis(300),
            scroll_threshold_px: 100.0,
            badge_cap: 99,
        }
    }
}

impl From<&UiConfig> for UiSettings {
    fn from(cfg: &UiConfig) -> Self {
        Self {
            flash_dismiss_delay: Duration::from_millis(cfg.flash_dismiss_ms),
            toast_lifetime: Duration::from_millis(cfg.toast_lifetime_ms),
            fade_duration: Duration::from_millis(cfg.fade_ms),
            scroll_threshold_px: cfg.scroll_threshold_px,
            badge_cap: cfg.badge_cap,
        }
    }
}
