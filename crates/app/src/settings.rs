//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and `EXPENSE_LEDGER_*` environment variables,
//! e.g. `EXPENSE_LEDGER_SERVER__PORT=3000`.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use ledger::{Amount, CategorySet, DEFAULT_CATEGORIES, ThresholdMonitor, ValidationPolicy};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Validation {
    pub reject_non_positive_amount: bool,
    pub reject_empty_description: bool,
    pub restrict_categories: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ledger {
    /// Spending ceiling in minor units; the warning fires at 90% of it.
    pub ceiling_minor: i64,
    pub categories: Vec<String>,
    pub validation: Validation,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            ceiling_minor: 10_000,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            validation: Validation::default(),
        }
    }
}

impl Ledger {
    pub fn threshold_monitor(&self) -> ThresholdMonitor {
        ThresholdMonitor::new(Amount::new(self.ceiling_minor))
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            reject_non_positive_amount: self.validation.reject_non_positive_amount,
            reject_empty_description: self.validation.reject_empty_description,
            restrict_categories: self.validation.restrict_categories,
            categories: CategorySet::new(self.categories.iter().map(String::as_str)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub ledger: Ledger,
}

#[derive(Debug, Parser)]
#[command(name = "expense_ledger", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(path).required(false))
                .add_source(
                    Environment::with_prefix("EXPENSE_LEDGER")
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
